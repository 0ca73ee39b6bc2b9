//! Form controller integration tests.

use admissions_core::form::{AdmissionForm, FieldInput, FormError, FormIntent};
use admissions_core::models::FormMode;
use proptest::prelude::*;

fn edit(form: &mut AdmissionForm, name: &str, value: &str) {
    form.update_field(name, FieldInput::Value(value.to_string()))
        .unwrap();
}

#[test]
fn test_entering_consultation_prefixes_mrn() {
    let mut form = AdmissionForm::new();
    form.set_mode(FormMode::Consultation);
    edit(&mut form, "mrn", "123");
    form.set_mode(FormMode::Admission);
    form.set_mode(FormMode::Consultation);
    assert_eq!(form.consultation().mrn, "C-123");

    form.set_mode(FormMode::Consultation);
    assert_eq!(form.consultation().mrn, "C-123");

    edit(&mut form, "mrn", "C-9");
    edit(&mut form, "mrn", "9");
    form.set_mode(FormMode::Consultation);
    assert_eq!(form.consultation().mrn, "9");
}

#[test]
fn test_weekend_morning_then_clear() {
    let mut form = AdmissionForm::new();
    form.update_field("is_weekend_shift", FieldInput::Checked(true))
        .unwrap();
    edit(&mut form, "shift_type", "Morning 12 hours");
    assert_eq!(form.admission().admission_time, "07:00");

    form.update_field("is_weekend_shift", FieldInput::Checked(false))
        .unwrap();
    assert_eq!(form.admission().shift_type, "");
    assert_eq!(form.admission().admission_time, "");
}

#[test]
fn test_night_shift_and_unknown_shift() {
    let mut form = AdmissionForm::new();
    edit(&mut form, "shift_type", "Night");
    assert_eq!(form.admission().admission_time, "23:00");

    edit(&mut form, "shift_type", "Night 12 hours");
    assert_eq!(form.admission().admission_time, "");
}

#[test]
fn test_inactive_draft_retained_across_toggles() {
    let mut form = AdmissionForm::new();
    edit(&mut form, "patient_name", "Alan Turing");
    edit(&mut form, "diagnosis", "Cyanide exposure");

    form.set_mode(FormMode::Consultation);
    edit(&mut form, "patient_name", "Joan Clarke");
    form.set_mode(FormMode::Admission);

    assert_eq!(form.admission().patient_name, "Alan Turing");
    assert_eq!(form.admission().diagnosis, "Cyanide exposure");
    assert_eq!(form.consultation().patient_name, "Joan Clarke");
}

fn field() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("mrn"),
        Just("patient_name"),
        Just("age"),
        Just("gender"),
        Just("shift_type"),
        Just("diagnosis"),
        Just("requesting_department"),
        Just("patient_location"),
    ]
}

fn field_value(field: &'static str) -> BoxedStrategy<String> {
    match field {
        "age" => (0u8..=150).prop_map(|a| a.to_string()).boxed(),
        "gender" => prop_oneof![Just("Male".to_string()), Just("Female".to_string())].boxed(),
        "shift_type" => prop_oneof![
            Just("Morning".to_string()),
            Just("Night".to_string()),
            Just("Morning 12 hours".to_string()),
            Just("Night 12 hours".to_string()),
            Just(String::new()),
        ]
        .boxed(),
        _ => "[A-Za-z0-9 -]{0,12}".boxed(),
    }
}

fn intent() -> impl Strategy<Value = FormIntent> {
    prop_oneof![
        prop_oneof![Just(FormMode::Admission), Just(FormMode::Consultation)]
            .prop_map(FormIntent::SwitchMode),
        field().prop_flat_map(|name| field_value(name).prop_map(move |value| {
            FormIntent::EditField {
                name: name.to_string(),
                value,
            }
        })),
        any::<bool>().prop_map(|checked| FormIntent::ToggleCheckbox {
            name: "is_weekend_shift".to_string(),
            checked,
        }),
    ]
}

proptest! {
    #[test]
    fn prop_edits_only_touch_active_draft(intents in prop::collection::vec(intent(), 0..30)) {
        let mut form = AdmissionForm::new();
        for intent in intents {
            let before = form.clone();
            let is_edit = !matches!(intent, FormIntent::SwitchMode(_));

            match form.apply(intent) {
                Ok(()) => {}
                // Fields that belong to the other mode are rejected without side effects.
                Err(FormError::UnknownField { mode, .. }) => {
                    prop_assert_eq!(mode, before.mode());
                    prop_assert_eq!(&form, &before);
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }

            if is_edit {
                prop_assert_eq!(form.mode(), before.mode());
                match form.mode() {
                    FormMode::Admission => {
                        prop_assert_eq!(form.consultation(), before.consultation())
                    }
                    FormMode::Consultation => {
                        prop_assert_eq!(form.admission(), before.admission())
                    }
                }
            }
        }
    }

    #[test]
    fn prop_consultation_mrn_never_double_prefixed(mrn in "[0-9]{1,8}", toggles in 1usize..6) {
        let mut form = AdmissionForm::new();
        form.set_mode(FormMode::Consultation);
        edit(&mut form, "mrn", &mrn);
        for _ in 0..toggles {
            form.set_mode(FormMode::Admission);
            form.set_mode(FormMode::Consultation);
        }
        prop_assert_eq!(form.consultation().mrn.clone(), format!("C-{}", mrn));
    }
}
