mod common;

use checkout_forms::application::engine::SubmitOutcome;
use checkout_forms::config::{FormConfig, ValidationMode};
use checkout_forms::domain::country::StaticCountryCatalog;
use checkout_forms::domain::ports::CountryCatalog;
use checkout_forms::forms::mbway::{MBWayFieldId, PHONE_NUMBER_INVALID};
use common::mbway_engine;

#[test]
fn test_portuguese_number_can_submit() {
    let (mut engine, _) = mbway_engine(FormConfig::default());
    engine
        .on_field_value_changed(MBWayFieldId::PhoneNumber, Some("912345678".to_string()))
        .unwrap();

    assert_eq!(engine.state().calling_code(), "+351");
    assert!(engine.can_submit());
}

#[test]
fn test_leading_zero_stripped_and_displayed() {
    let (mut engine, _) = mbway_engine(FormConfig::default());
    engine
        .on_field_value_changed(MBWayFieldId::PhoneNumber, Some("0912345678".to_string()))
        .unwrap();

    assert_eq!(engine.state().phone_number.value(), "912345678");
    assert_eq!(engine.view_state().phone_number_field_state.value, "912345678");
}

#[tokio::test]
async fn test_empty_number_highlights_and_focuses() {
    let (mut engine, handler) = mbway_engine(FormConfig::default());
    engine
        .on_field_value_changed(MBWayFieldId::PhoneNumber, Some(String::new()))
        .unwrap();
    assert!(!engine.can_submit());

    assert_eq!(engine.submit().await.unwrap(), SubmitOutcome::Rejected);

    let view = engine.view_state();
    assert_eq!(view.phone_number_field_state.error_message, Some(PHONE_NUMBER_INVALID));
    assert!(view.phone_number_field_state.is_focused);
    assert_eq!(view.country_code_field_state.error_message, None);
    assert!(handler.submissions().await.is_empty());
}

#[test]
fn test_untouched_form_is_invalid_but_quiet() {
    let (mut engine, _) = mbway_engine(FormConfig::default());

    assert!(!engine.can_submit());
    assert!(engine.shown_errors().is_empty());
    assert_eq!(engine.view_state().phone_number_field_state.error_message, None);

    engine
        .on_field_focus_changed(MBWayFieldId::PhoneNumber, true)
        .unwrap();
    assert!(engine.shown_errors().is_empty());

    engine
        .on_field_focus_changed(MBWayFieldId::PhoneNumber, false)
        .unwrap();
    assert_eq!(
        engine.shown_errors(),
        vec![(MBWayFieldId::PhoneNumber, PHONE_NUMBER_INVALID)]
    );
}

#[test]
fn test_refocus_hides_error_but_keeps_it() {
    let (mut engine, _) = mbway_engine(FormConfig::default());
    engine.highlight_all_errors().unwrap();
    engine
        .on_field_focus_changed(MBWayFieldId::PhoneNumber, true)
        .unwrap();

    let state = engine.state();
    assert!(!state.phone_number.show_error());
    assert_eq!(state.phone_number.error_message(), Some(PHONE_NUMBER_INVALID));
}

#[test]
fn test_typing_clears_error_on_blur_mode() {
    let (mut engine, _) = mbway_engine(FormConfig::default());
    engine.highlight_all_errors().unwrap();
    engine
        .on_field_value_changed(MBWayFieldId::PhoneNumber, Some("9".to_string()))
        .unwrap();

    assert_eq!(engine.state().phone_number.error_message(), None);
    assert!(engine.shown_errors().is_empty());
    assert!(!engine.can_submit());
}

#[test]
fn test_eager_mode_recomputes_error_on_change() {
    let config = FormConfig {
        validation_mode: ValidationMode::Eager,
        ..FormConfig::default()
    };
    let (mut engine, _) = mbway_engine(config);
    engine
        .on_field_value_changed(MBWayFieldId::PhoneNumber, Some("9".to_string()))
        .unwrap();
    assert_eq!(engine.state().phone_number.error_message(), Some(PHONE_NUMBER_INVALID));
    assert!(engine.shown_errors().is_empty());

    engine
        .on_field_value_changed(MBWayFieldId::PhoneNumber, Some("912345678".to_string()))
        .unwrap();
    assert_eq!(engine.state().phone_number.error_message(), None);
}

#[tokio::test]
async fn test_switching_country_changes_payload() {
    let (mut engine, _) = mbway_engine(FormConfig::default());
    let spain = StaticCountryCatalog::new()
        .localized_countries("en", Some(&["ES"]))
        .into_iter()
        .next();

    engine
        .on_field_value_changed(MBWayFieldId::CountryCode, Some(spain))
        .unwrap();
    engine
        .on_field_value_changed(MBWayFieldId::PhoneNumber, Some("612345678".to_string()))
        .unwrap();

    assert_eq!(engine.view_state().phone_number_prefix, "ES +34");
    match engine.submit().await.unwrap() {
        SubmitOutcome::Submitted(state) => {
            assert_eq!(state.data.payment_method.telephone_number, "+34612345678");
        }
        SubmitOutcome::Rejected => panic!("valid Spanish number was rejected"),
    }
}

#[tokio::test]
async fn test_checkout_attempt_id_is_forwarded() {
    let config = FormConfig {
        checkout_attempt_id: Some("do-not-track".to_string()),
        ..FormConfig::default()
    };
    let (mut engine, handler) = mbway_engine(config);
    engine
        .on_field_value_changed(MBWayFieldId::PhoneNumber, Some("912345678".to_string()))
        .unwrap();
    engine.submit().await.unwrap();

    let submitted = handler.submissions().await;
    assert_eq!(submitted.len(), 1);
    assert_eq!(
        submitted[0].data.payment_method.checkout_attempt_id.as_deref(),
        Some("do-not-track")
    );
}

#[test]
fn test_fresh_engines_do_not_share_state() {
    let (mut first, _) = mbway_engine(FormConfig::default());
    let (second, _) = mbway_engine(FormConfig::default());

    first
        .on_field_value_changed(MBWayFieldId::PhoneNumber, Some("912345678".to_string()))
        .unwrap();

    assert!(first.can_submit());
    assert!(!second.can_submit());
    assert_eq!(second.state().phone_number.value(), "");
}

#[test]
fn test_country_switch_clears_stale_phone_error() {
    for validation_mode in [ValidationMode::OnBlur, ValidationMode::Eager] {
        let config = FormConfig {
            validation_mode,
            ..FormConfig::default()
        };
        let (mut engine, _) = mbway_engine(config);
        let spain = engine.form().find_country("ES").cloned();
        let portugal = engine.form().find_country("PT").cloned();

        engine
            .on_field_value_changed(MBWayFieldId::CountryCode, Some(spain))
            .unwrap();
        engine
            .on_field_value_changed(MBWayFieldId::PhoneNumber, Some("123456".to_string()))
            .unwrap();
        engine
            .on_field_focus_changed(MBWayFieldId::PhoneNumber, true)
            .unwrap();
        engine
            .on_field_focus_changed(MBWayFieldId::PhoneNumber, false)
            .unwrap();
        assert_eq!(
            engine.shown_errors(),
            vec![(MBWayFieldId::PhoneNumber, PHONE_NUMBER_INVALID)],
            "{validation_mode:?}"
        );

        engine
            .on_field_value_changed(MBWayFieldId::CountryCode, Some(portugal))
            .unwrap();

        assert!(engine.can_submit(), "{validation_mode:?}");
        assert!(engine.shown_errors().is_empty(), "{validation_mode:?}");
        assert_eq!(engine.view_state().phone_number_field_state.error_message, None);
    }
}

#[test]
fn test_eager_country_switch_flags_newly_invalid_phone() {
    let config = FormConfig {
        validation_mode: ValidationMode::Eager,
        ..FormConfig::default()
    };
    let (mut engine, _) = mbway_engine(config);
    let spain = engine.form().find_country("ES").cloned();

    engine
        .on_field_value_changed(MBWayFieldId::PhoneNumber, Some("123456".to_string()))
        .unwrap();
    assert_eq!(engine.state().phone_number.error_message(), None);

    engine
        .on_field_value_changed(MBWayFieldId::CountryCode, Some(spain))
        .unwrap();

    assert_eq!(engine.state().phone_number.error_message(), Some(PHONE_NUMBER_INVALID));
    assert!(engine.shown_errors().is_empty());
    assert!(!engine.can_submit());
}
