pub mod calculation;
pub mod color;
pub mod distribution;
pub mod feedback;
pub mod figure;
pub mod form;
pub mod numeric;
pub mod trace_look;
