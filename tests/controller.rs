use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use distcalc::data::feedback::{NoticeLevel, ResultView};
use distcalc::*;
use serde_json::{json, Value};

const WAIT: Duration = Duration::from_secs(5);

/// Replies queued in order; every request is recorded.
#[derive(Default)]
struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<HttpReply, ClientError>>>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl ScriptedTransport {
    fn reply(&self, status: u16, body: Value) {
        self.replies.lock().unwrap().push_back(Ok(HttpReply {
            status,
            body: body.to_string().into_bytes(),
        }));
    }

    fn fail(&self, reason: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(ClientError::Transport(reason.to_string())));
    }

    fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn post_json<'a>(&'a self, path: &'a str, body: String) -> TransportFuture<'a> {
        Box::pin(async move {
            let value = serde_json::from_str(&body).map_err(ClientError::Decode)?;
            self.requests.lock().unwrap().push((path.to_string(), value));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ClientError::Transport("no scripted reply".into())))
        })
    }
}

fn controller() -> (FormController, Arc<ScriptedTransport>) {
    let cfg = DistCalcConfig::default();
    let transport = Arc::new(ScriptedTransport::default());
    let client = ApiClient::new(transport.clone(), &cfg.server);
    (FormController::new(&cfg, client).unwrap(), transport)
}

fn submit(ctl: &mut FormController, event: FormEvent) -> Outcome {
    let outcomes = ctl.subscribe();
    ctl.handle(event);
    assert_eq!(ctl.pump_timeout(WAIT), 1);
    assert_eq!(ctl.in_flight(), 0);
    outcomes.try_recv().unwrap()
}

fn figure_json() -> String {
    json!({
        "data": [{"x": [0, 1, 2], "y": [0.1, 0.5, 0.1], "name": "density"}],
        "layout": {"title": "density"}
    })
    .to_string()
}

#[test]
fn saving_parameters_posts_every_slot() {
    let (mut ctl, transport) = controller();
    transport.reply(200, json!({"status": "ok"}));
    ctl.handle(FormEvent::DistributionTypeChanged {
        index: 1,
        kind: DistributionType::Exponential,
    });
    ctl.parameters.slots[0].mean = "5".into();
    ctl.parameters.slots[0].std = "2".into();
    ctl.parameters.slots[1].lambda = "1.5".into();

    assert_eq!(submit(&mut ctl, FormEvent::SubmitParameters), Outcome::ParametersSaved);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let (path, body) = &requests[0];
    assert_eq!(path, "/save_parameters");
    assert_eq!(body["0"], json!({"type": "normal", "params": {"mean": 5, "std": 2}}));
    assert_eq!(body["1"], json!({"type": "exponential", "params": {"lambda": 1.5}}));
    assert_eq!(body.as_object().unwrap().len(), SLOT_COUNT);

    let notice = ctl.notifications.current().unwrap();
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.text, ctl.messages().parameters_saved);
}

#[test]
fn rejected_save_reports_failure() {
    let (mut ctl, transport) = controller();
    transport.reply(500, json!({"status": "error"}));
    assert_eq!(
        submit(&mut ctl, FormEvent::SubmitParameters),
        Outcome::ParametersRejected { status: 500 }
    );
    let notice = ctl.notifications.current().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.text, ctl.messages().parameters_save_failed);
}

#[test]
fn unreachable_backend_reports_send_failure() {
    let (mut ctl, transport) = controller();
    transport.fail("connection refused");
    assert_eq!(submit(&mut ctl, FormEvent::SubmitParameters), Outcome::SendFailed);
    assert_eq!(ctl.notifications.current().unwrap().text, ctl.messages().send_failed);
}

#[test]
fn unreadable_fields_are_flagged_but_still_sent() {
    let (mut ctl, transport) = controller();
    transport.reply(200, json!({}));
    ctl.parameters.slots[3].std = "abc".into();

    assert_eq!(submit(&mut ctl, FormEvent::SubmitParameters), Outcome::ParametersSaved);
    assert_eq!(transport.requests()[0].1["3"]["params"]["std"], Value::Null);

    let first = ctl.notifications.dismiss().unwrap();
    assert_eq!(first.level, NoticeLevel::Warning);
    assert!(first.text.contains("std-3"));
    assert_eq!(ctl.notifications.current().unwrap().level, NoticeLevel::Info);
}

#[test]
fn x_calculation_renders_figure_and_probability() {
    let (mut ctl, transport) = controller();
    transport.reply(200, json!({"plot": figure_json(), "probability": 0.682689}));
    ctl.calculations.combination = "0 1".into();
    ctl.calculations.x_min = "-1".into();
    ctl.calculations.x_max = "1".into();

    assert_eq!(submit(&mut ctl, FormEvent::SubmitCalculation), Outcome::PlotShown);

    let (path, body) = &transport.requests()[0];
    assert_eq!(path, "/calculate");
    assert_eq!(
        *body,
        json!({"combination": [0, 1], "calc_type": "x", "x_min": -1, "x_max": 1})
    );
    let figure = ctl.figure.as_ref().unwrap();
    assert_eq!(figure.traces[0].name, "density");
    assert_eq!(
        ctl.result,
        ResultView::Probability {
            value: "0.6827".into()
        }
    );
    assert!(ctl.notifications.current().is_none());
}

#[test]
fn server_error_message_is_shown_and_views_untouched() {
    let (mut ctl, transport) = controller();
    transport.reply(400, json!({"status": "error", "message": "bad input"}));
    ctl.calculations.combination = "9".into();
    ctl.calculations.x_min = "0".into();
    ctl.calculations.x_max = "1".into();

    assert_eq!(
        submit(&mut ctl, FormEvent::SubmitCalculation),
        Outcome::CalculationFailed {
            message: "bad input".into()
        }
    );
    assert!(ctl.figure.is_none());
    assert_eq!(ctl.result, ResultView::Empty);
    let notice = ctl.notifications.current().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.text, "bad input");
}

#[test]
fn server_error_without_message_uses_generic_text() {
    let (mut ctl, transport) = controller();
    transport.reply(500, json!({"status": "error"}));
    let expected = ctl.messages().calculation_error.clone();
    assert_eq!(
        submit(&mut ctl, FormEvent::SubmitCalculation),
        Outcome::CalculationFailed { message: expected }
    );
}

#[test]
fn y_calculation_shows_rounded_range() {
    let (mut ctl, transport) = controller();
    transport.reply(200, json!({"x_min": 1.23456, "x_max": 2.34567}));
    ctl.handle(FormEvent::CalcTypeChanged(CalcType::YValue));
    ctl.calculations.combination = "0".into();
    ctl.calculations.y = "0.9".into();

    assert_eq!(
        submit(&mut ctl, FormEvent::SubmitCalculation),
        Outcome::RangeShown {
            x_min: "1.2346".into(),
            x_max: "2.3457".into()
        }
    );
    assert_eq!(
        transport.requests()[0].1,
        json!({"combination": [0], "calc_type": "y", "y": 0.9})
    );
    assert!(ctl.figure.is_none());
}

#[test]
fn y_calculation_without_range_says_so() {
    let (mut ctl, transport) = controller();
    transport.reply(200, json!({"x_min": null, "x_max": null}));
    ctl.handle(FormEvent::CalcTypeChanged(CalcType::YValue));
    ctl.calculations.y = "0.99".into();

    assert_eq!(submit(&mut ctl, FormEvent::SubmitCalculation), Outcome::NoRange);
    assert_eq!(ctl.result, ResultView::NoRange);
}

#[test]
fn y_calculation_with_one_bound_says_no_range() {
    for reply in [
        json!({"x_min": 1.5}),
        json!({"x_min": null, "x_max": 2}),
        json!({"status": "success", "x_min": 1.64, "plot": figure_json()}),
    ] {
        let (mut ctl, transport) = controller();
        transport.reply(200, reply);
        ctl.handle(FormEvent::CalcTypeChanged(CalcType::YValue));
        ctl.calculations.y = "0.95".into();

        assert_eq!(submit(&mut ctl, FormEvent::SubmitCalculation), Outcome::NoRange);
        assert_eq!(ctl.result, ResultView::NoRange);
    }
}

#[test]
fn y_calculation_draws_plot_when_sent() {
    let (mut ctl, transport) = controller();
    transport.reply(200, json!({"x_min": 0, "x_max": 1, "plot": figure_json()}));
    ctl.handle(FormEvent::CalcTypeChanged(CalcType::YValue));
    ctl.calculations.y = "0.5".into();

    assert!(matches!(
        submit(&mut ctl, FormEvent::SubmitCalculation),
        Outcome::RangeShown { .. }
    ));
    assert!(ctl.figure.is_some());
}

#[test]
fn undecodable_figure_is_a_failed_calculation() {
    let (mut ctl, transport) = controller();
    transport.reply(200, json!({"plot": "not a figure"}));
    let expected = ctl.messages().calculation_failed.clone();
    assert_eq!(
        submit(&mut ctl, FormEvent::SubmitCalculation),
        Outcome::CalculationFailed { message: expected }
    );
    assert!(ctl.figure.is_none());
}

#[test]
fn non_json_reply_is_a_failed_calculation() {
    let (mut ctl, transport) = controller();
    transport.replies.lock().unwrap().push_back(Ok(HttpReply {
        status: 502,
        body: b"<html>Bad Gateway</html>".to_vec(),
    }));
    let expected = ctl.messages().calculation_failed.clone();
    assert_eq!(
        submit(&mut ctl, FormEvent::SubmitCalculation),
        Outcome::CalculationFailed { message: expected }
    );
}

#[test]
fn notices_queue_until_dismissed() {
    let (mut ctl, transport) = controller();
    transport.reply(200, json!({}));
    transport.fail("timeout");
    submit(&mut ctl, FormEvent::SubmitParameters);
    submit(&mut ctl, FormEvent::SubmitParameters);

    assert_eq!(ctl.notifications.pending_len(), 2);
    ctl.handle(FormEvent::DismissNotice);
    assert_eq!(ctl.notifications.current().unwrap().text, ctl.messages().send_failed);
    ctl.handle(FormEvent::DismissNotice);
    assert!(ctl.notifications.current().is_none());
    assert_eq!(ctl.notifications.history().count(), 2);
}

#[test]
fn form_events_update_visibility_without_requests() {
    let (mut ctl, transport) = controller();
    ctl.handle(FormEvent::DistributionTypeChanged {
        index: 3,
        kind: DistributionType::Exponential,
    });
    ctl.handle(FormEvent::DistributionTypeChanged {
        index: 9,
        kind: DistributionType::Exponential,
    });
    ctl.handle(FormEvent::CalcTypeChanged(CalcType::YValue));

    assert_eq!(ctl.parameters.visible_block(3), Some(ParamBlock::Exponential));
    assert_eq!(ctl.calculations.visible_inputs(), CalcInputs::YValue);
    assert_eq!(ctl.in_flight(), 0);
    assert_eq!(ctl.pump(), 0);
    assert!(transport.requests().is_empty());
}

#[test]
fn each_new_figure_bumps_the_generation() {
    let (mut ctl, transport) = controller();
    assert_eq!(ctl.figure_generation(), 0);
    ctl.calculations.combination = "0".into();
    ctl.calculations.x_min = "-1".into();
    ctl.calculations.x_max = "1".into();

    transport.reply(200, json!({"plot": figure_json(), "probability": 0.5}));
    assert_eq!(submit(&mut ctl, FormEvent::SubmitCalculation), Outcome::PlotShown);
    assert_eq!(ctl.figure_generation(), 1);

    transport.reply(200, json!({"plot": figure_json(), "probability": 0.25}));
    assert_eq!(submit(&mut ctl, FormEvent::SubmitCalculation), Outcome::PlotShown);
    assert_eq!(ctl.figure_generation(), 2);

    transport.reply(200, json!({"plot": "not a figure"}));
    submit(&mut ctl, FormEvent::SubmitCalculation);
    assert_eq!(ctl.figure_generation(), 2);
    assert!(ctl.figure.is_some());
}
