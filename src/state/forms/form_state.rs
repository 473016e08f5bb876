//! Form state engine: values, validation and transient submit messages

use super::field::{FormConfig, FormValues};
use super::timer::{FlagExpiry, FlagTimer};
use crate::sink::SubmissionSink;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Transient message shown after a submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransientFlag {
    #[default]
    None,
    Success,
    Error,
}

impl TransientFlag {
    /// Text shown on the submit button while the flag is active
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Success => Some("Form Submitted Successfully!"),
            Self::Error => Some("Please complete form"),
        }
    }
}

/// Result of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Values were handed to the sink and the form was cleared
    Submitted,
    /// No field held a non-blank value
    Rejected,
    /// A transient message is still showing, submit is disabled
    Blocked,
}

/// How long each transient message stays visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagTimings {
    pub error: Duration,
    pub success: Duration,
}

impl FlagTimings {
    pub const DEFAULT_ERROR: Duration = Duration::from_millis(3000);
    pub const DEFAULT_SUCCESS: Duration = Duration::from_millis(5000);
}

impl Default for FlagTimings {
    fn default() -> Self {
        Self {
            error: Self::DEFAULT_ERROR,
            success: Self::DEFAULT_SUCCESS,
        }
    }
}

/// Owns the mutable state of a loaded form.
///
/// Values are keyed by field name, so fields sharing a name across groups are
/// bound to the same entry and the most recent edit wins.
#[derive(Debug)]
pub struct FormEngine {
    config: FormConfig,
    values: FormValues,
    flag: TransientFlag,
    timer: FlagTimer,
    timings: FlagTimings,
    /// Names shared by more than one field in `config`
    duplicates: Vec<String>,
}

impl FormEngine {
    pub fn new(config: FormConfig, timings: FlagTimings, tx: UnboundedSender<FlagExpiry>) -> Self {
        let mut engine = Self {
            config: FormConfig::default(),
            values: FormValues::new(),
            flag: TransientFlag::None,
            timer: FlagTimer::new(tx),
            timings,
            duplicates: Vec::new(),
        };
        engine.initialize(config);
        engine
    }

    /// Install a configuration and reset all state. Duplicate field names are
    /// reported but accepted.
    pub fn initialize(&mut self, config: FormConfig) -> &[String] {
        self.duplicates = config.duplicate_names();
        if !self.duplicates.is_empty() {
            tracing::warn!(
                "Warning: Duplicate field names found: {}. Fields sharing a name will share one value.",
                self.duplicates.join(", ")
            );
        }
        self.config = config;
        self.values.clear();
        self.flag = TransientFlag::None;
        self.timer.cancel();
        &self.duplicates
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Duplicate field names found when the current config was installed
    pub fn duplicate_names(&self) -> &[String] {
        &self.duplicates
    }

    #[cfg(test)]
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn flag(&self) -> TransientFlag {
        self.flag
    }

    /// Current value of a field; untouched fields read as empty
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Whether at least one field holds a non-blank value
    pub fn is_valid(&self) -> bool {
        self.values.values().any(|v| !v.trim().is_empty())
    }

    /// Record an edit. Any edit dismisses a showing error.
    pub fn on_field_change(&mut self, name: &str, value: String) {
        self.values.insert(name.to_string(), value);
        if self.flag == TransientFlag::Error {
            self.set_flag(TransientFlag::None);
        }
    }

    /// Validate and, if valid, hand the current values to `sink` and reset
    pub fn on_submit(&mut self, sink: &mut dyn SubmissionSink) -> SubmitOutcome {
        if self.flag != TransientFlag::None {
            tracing::debug!(flag = ?self.flag, "submit ignored while message is showing");
            return SubmitOutcome::Blocked;
        }

        if !self.is_valid() {
            tracing::info!("submit rejected: no field has a value");
            self.set_flag(TransientFlag::Error);
            return SubmitOutcome::Rejected;
        }

        sink.consume(&self.values);
        tracing::info!(fields = self.values.len(), "form submitted");
        self.set_flag(TransientFlag::Success);
        self.values.clear();
        SubmitOutcome::Submitted
    }

    /// Apply a fired timer. Stale timers and timers whose flag has since
    /// changed are ignored.
    pub fn on_flag_expired(&mut self, expiry: FlagExpiry) {
        if !self.timer.is_current(expiry.generation) {
            tracing::trace!(generation = expiry.generation, "ignoring stale flag timer");
            return;
        }
        self.timer.mark_fired();
        if self.flag == expiry.flag {
            self.flag = TransientFlag::None;
        }
    }

    fn set_flag(&mut self, flag: TransientFlag) {
        self.flag = flag;
        match flag {
            TransientFlag::None => self.timer.cancel(),
            TransientFlag::Error => {
                self.timer.schedule(flag, self.timings.error);
            }
            TransientFlag::Success => {
                self.timer.schedule(flag, self.timings.success);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MockSubmissionSink;
    use crate::state::forms::field::{FieldDescriptor, QuestionGroup};
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc::{self, UnboundedReceiver};
    use tokio::time::Instant;

    fn single_field_config() -> FormConfig {
        FormConfig {
            groups: vec![QuestionGroup {
                title: "Tell us about yourself".to_string(),
                fields: vec![FieldDescriptor::text("first_name", "First Name")],
            }],
        }
    }

    fn test_config() -> FormConfig {
        FormConfig {
            groups: vec![QuestionGroup {
                title: "Test Question".to_string(),
                fields: vec![
                    FieldDescriptor::text("test_field", "Test Field"),
                    FieldDescriptor::dropdown(
                        "test_dropdown",
                        "Test Dropdown",
                        &["Option 1", "Option 2"],
                    ),
                ],
            }],
        }
    }

    fn duplicate_config() -> FormConfig {
        FormConfig {
            groups: vec![
                QuestionGroup {
                    title: "Test Question 1".to_string(),
                    fields: vec![FieldDescriptor::text("duplicate_field", "First Duplicate")],
                },
                QuestionGroup {
                    title: "Test Question 2".to_string(),
                    fields: vec![FieldDescriptor::text("duplicate_field", "Second Duplicate")],
                },
            ],
        }
    }

    fn engine(config: FormConfig) -> (FormEngine, UnboundedReceiver<FlagExpiry>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (FormEngine::new(config, FlagTimings::default(), tx), rx)
    }

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn accepting() -> MockSubmissionSink {
        let mut sink = MockSubmissionSink::new();
        sink.expect_consume().return_const(());
        sink
    }

    fn never_called() -> MockSubmissionSink {
        let mut sink = MockSubmissionSink::new();
        sink.expect_consume().never();
        sink
    }

    mod initialize {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_starts_empty() {
            let (engine, _rx) = engine(test_config());
            assert!(engine.values().is_empty());
            assert_eq!(engine.flag(), TransientFlag::None);
            assert_eq!(engine.value("test_field"), "");
        }

        #[tokio::test]
        async fn test_new_records_duplicates() {
            let (engine, _rx) = engine(duplicate_config());
            assert_eq!(engine.duplicate_names(), ["duplicate_field".to_string()].as_slice());
        }

        #[tokio::test]
        async fn test_reports_duplicates_but_accepts_config() {
            let (mut engine, _rx) = engine(test_config());
            let duplicates = engine.initialize(duplicate_config()).to_vec();
            assert_eq!(duplicates, vec!["duplicate_field".to_string()]);
            assert_eq!(engine.config().field_count(), 2);
            assert_eq!(engine.duplicate_names(), duplicates.as_slice());

            engine.initialize(test_config());
            assert!(engine.duplicate_names().is_empty());
        }

        #[tokio::test]
        async fn test_resets_values_and_flag() {
            let (mut engine, _rx) = engine(test_config());
            engine.on_field_change("test_field", "x".to_string());
            engine.on_submit(&mut accepting());
            assert_eq!(engine.flag(), TransientFlag::Success);

            engine.on_field_change("test_field", "y".to_string());
            engine.initialize(test_config());
            assert!(engine.values().is_empty());
            assert_eq!(engine.flag(), TransientFlag::None);
        }
    }

    mod field_change {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_inserts_and_overwrites() {
            let (mut engine, _rx) = engine(test_config());
            engine.on_field_change("test_field", "a".to_string());
            engine.on_field_change("test_field", "ab".to_string());
            assert_eq!(engine.values(), &values(&[("test_field", "ab")]));
        }

        #[tokio::test]
        async fn test_edit_clears_error_for_any_field_and_value() {
            for (name, value) in [("test_field", "a"), ("test_dropdown", ""), ("unknown", " ")] {
                let (mut engine, _rx) = engine(test_config());
                engine.on_submit(&mut never_called());
                assert_eq!(engine.flag(), TransientFlag::Error);

                engine.on_field_change(name, value.to_string());
                assert_eq!(engine.flag(), TransientFlag::None);
            }
        }

        #[tokio::test]
        async fn test_edit_does_not_clear_success() {
            let (mut engine, _rx) = engine(test_config());
            engine.on_field_change("test_field", "value".to_string());
            engine.on_submit(&mut accepting());

            engine.on_field_change("test_field", "next".to_string());
            assert_eq!(engine.flag(), TransientFlag::Success);
            assert_eq!(engine.value("test_field"), "next");
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_empty_form_is_rejected() {
            let (mut engine, _rx) = engine(test_config());
            let outcome = engine.on_submit(&mut never_called());
            assert_eq!(outcome, SubmitOutcome::Rejected);
            assert_eq!(engine.flag(), TransientFlag::Error);
        }

        #[tokio::test]
        async fn test_whitespace_only_is_rejected_and_values_kept() {
            let (mut engine, _rx) = engine(test_config());
            engine.on_field_change("test_field", "   ".to_string());
            engine.on_field_change("test_dropdown", "\t".to_string());

            let outcome = engine.on_submit(&mut never_called());
            assert_eq!(outcome, SubmitOutcome::Rejected);
            assert_eq!(
                engine.values(),
                &values(&[("test_field", "   "), ("test_dropdown", "\t")])
            );
        }

        #[tokio::test]
        async fn test_valid_submit_passes_exact_values_once() {
            let (mut engine, _rx) = engine(test_config());
            engine.on_field_change("test_field", "test value".to_string());
            engine.on_field_change("test_dropdown", "Option 1".to_string());

            let expected = values(&[("test_field", "test value"), ("test_dropdown", "Option 1")]);
            let mut sink = MockSubmissionSink::new();
            sink.expect_consume()
                .withf(move |snapshot| snapshot == &expected)
                .times(1)
                .return_const(());

            let outcome = engine.on_submit(&mut sink);
            assert_eq!(outcome, SubmitOutcome::Submitted);
            assert!(engine.values().is_empty());
            assert_eq!(engine.flag(), TransientFlag::Success);
        }

        #[tokio::test]
        async fn test_one_filled_field_is_enough() {
            let (mut engine, _rx) = engine(test_config());
            engine.on_field_change("test_field", "test value".to_string());
            engine.on_field_change("test_dropdown", "".to_string());

            let expected = values(&[("test_field", "test value"), ("test_dropdown", "")]);
            let mut sink = MockSubmissionSink::new();
            sink.expect_consume()
                .withf(move |snapshot| snapshot == &expected)
                .times(1)
                .return_const(());

            assert_eq!(engine.on_submit(&mut sink), SubmitOutcome::Submitted);
        }

        #[tokio::test]
        async fn test_submit_blocked_while_message_showing() {
            let (mut engine, _rx) = engine(test_config());
            engine.on_submit(&mut never_called());
            assert_eq!(engine.on_submit(&mut never_called()), SubmitOutcome::Blocked);
            assert_eq!(engine.flag(), TransientFlag::Error);

            engine.on_field_change("test_field", "x".to_string());
            engine.on_submit(&mut accepting());
            assert_eq!(engine.on_submit(&mut never_called()), SubmitOutcome::Blocked);
            assert_eq!(engine.flag(), TransientFlag::Success);
        }

        #[tokio::test]
        async fn test_first_name_example() {
            let (mut engine, _rx) = engine(single_field_config());
            engine.on_field_change("first_name", "  ".to_string());
            assert_eq!(engine.on_submit(&mut never_called()), SubmitOutcome::Rejected);

            engine.on_field_change("first_name", "Ada".to_string());
            let mut sink = MockSubmissionSink::new();
            sink.expect_consume()
                .withf(|snapshot| snapshot == &values(&[("first_name", "Ada")]))
                .times(1)
                .return_const(());
            assert_eq!(engine.on_submit(&mut sink), SubmitOutcome::Submitted);
            assert_eq!(engine.value("first_name"), "");
        }

        #[tokio::test]
        async fn test_duplicate_names_last_write_wins() {
            let (mut engine, _rx) = engine(duplicate_config());
            engine.on_field_change("duplicate_field", "first value".to_string());
            engine.on_field_change("duplicate_field", "second value".to_string());

            let mut sink = MockSubmissionSink::new();
            sink.expect_consume()
                .withf(|snapshot| snapshot == &values(&[("duplicate_field", "second value")]))
                .times(1)
                .return_const(());
            engine.on_submit(&mut sink);
        }

        #[tokio::test]
        async fn test_duplicate_names_only_second_edited() {
            let (mut engine, _rx) = engine(duplicate_config());
            let second = engine.config().field_at(1).unwrap().name.clone();
            engine.on_field_change(&second, "from second".to_string());

            let mut sink = MockSubmissionSink::new();
            sink.expect_consume()
                .withf(|snapshot| snapshot == &values(&[("duplicate_field", "from second")]))
                .times(1)
                .return_const(());
            engine.on_submit(&mut sink);
        }
    }

    mod timers {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test(start_paused = true)]
        async fn test_error_clears_after_three_seconds() {
            let (mut engine, mut rx) = engine(test_config());
            let start = Instant::now();
            engine.on_submit(&mut never_called());

            let expiry = rx.recv().await.unwrap();
            assert_eq!(start.elapsed().as_millis(), 3000);
            engine.on_flag_expired(expiry);
            assert_eq!(engine.flag(), TransientFlag::None);
        }

        #[tokio::test(start_paused = true)]
        async fn test_success_clears_after_five_seconds() {
            let (mut engine, mut rx) = engine(test_config());
            engine.on_field_change("test_field", "value".to_string());
            let start = Instant::now();
            engine.on_submit(&mut accepting());

            let expiry = rx.recv().await.unwrap();
            assert_eq!(start.elapsed().as_millis(), 5000);
            assert_eq!(engine.flag(), TransientFlag::Success);
            engine.on_flag_expired(expiry);
            assert_eq!(engine.flag(), TransientFlag::None);
        }

        #[tokio::test(start_paused = true)]
        async fn test_edit_cancels_error_timer() {
            let (mut engine, mut rx) = engine(test_config());
            engine.on_submit(&mut never_called());
            engine.on_field_change("test_field", "a".to_string());

            let received = tokio::time::timeout(Duration::from_secs(60), rx.recv()).await;
            assert!(received.is_err());
            assert_eq!(engine.flag(), TransientFlag::None);
        }

        #[tokio::test(start_paused = true)]
        async fn test_second_error_gets_full_lifetime() {
            let (mut engine, mut rx) = engine(test_config());
            engine.on_submit(&mut never_called());
            tokio::time::sleep(Duration::from_millis(1000)).await;

            engine.on_field_change("test_field", String::new());
            engine.on_submit(&mut never_called());
            let start = Instant::now();

            tokio::time::sleep(Duration::from_millis(1500)).await;
            while let Ok(expiry) = rx.try_recv() {
                engine.on_flag_expired(expiry);
            }
            assert_eq!(engine.flag(), TransientFlag::Error);

            let expiry = rx.recv().await.unwrap();
            assert_eq!(start.elapsed().as_millis(), 3000);
            engine.on_flag_expired(expiry);
            assert_eq!(engine.flag(), TransientFlag::None);
        }

        #[tokio::test(start_paused = true)]
        async fn test_stale_expiry_does_not_clobber() {
            let (mut engine, _rx) = engine(test_config());
            engine.on_submit(&mut never_called());
            let stale = FlagExpiry {
                flag: TransientFlag::Error,
                generation: engine.timer.generation(),
            };

            // Error cleared by an edit, then a valid submit shows success
            engine.on_field_change("test_field", "a".to_string());
            engine.on_submit(&mut accepting());
            assert_eq!(engine.flag(), TransientFlag::Success);

            engine.on_flag_expired(stale);
            assert_eq!(engine.flag(), TransientFlag::Success);
        }

        #[tokio::test(start_paused = true)]
        async fn test_expiry_for_other_flag_is_ignored() {
            let (mut engine, _rx) = engine(test_config());
            engine.on_submit(&mut never_called());
            let mismatched = FlagExpiry {
                flag: TransientFlag::Success,
                generation: engine.timer.generation(),
            };

            engine.on_flag_expired(mismatched);
            assert_eq!(engine.flag(), TransientFlag::Error);
        }

        #[tokio::test(start_paused = true)]
        async fn test_custom_timings() {
            let (tx, mut rx) = mpsc::unbounded_channel();
            let timings = FlagTimings {
                error: Duration::from_millis(250),
                success: Duration::from_millis(500),
            };
            let mut engine = FormEngine::new(test_config(), timings, tx);
            let start = Instant::now();
            engine.on_submit(&mut never_called());

            let expiry = rx.recv().await.unwrap();
            assert_eq!(start.elapsed().as_millis(), 250);
            engine.on_flag_expired(expiry);
            assert_eq!(engine.flag(), TransientFlag::None);
        }
    }

    mod properties {
        use super::{never_called, FormConfig, FormEngine, SubmitOutcome, TransientFlag};
        use crate::sink::MockSubmissionSink;
        use crate::state::forms::field::{FieldDescriptor, FieldKind, QuestionGroup};
        use crate::state::FlagTimings;
        use proptest::prelude::*;
        use proptest::sample::Index;
        use tokio::sync::mpsc;

        /// Names come from a small pool so configs regularly share names
        /// across groups
        fn field_strategy() -> impl Strategy<Value = FieldDescriptor> {
            let name = (0..6u8).prop_map(|i| format!("field_{i}"));
            prop_oneof![
                name.clone().prop_map(|n| FieldDescriptor::text(&n, "Label")),
                (name, prop::collection::vec("[A-Za-z]{1,6}", 0..4)).prop_map(|(n, options)| {
                    FieldDescriptor {
                        name: n,
                        label: "Pick one".to_string(),
                        kind: FieldKind::Dropdown { options },
                    }
                }),
            ]
        }

        fn config_strategy() -> impl Strategy<Value = FormConfig> {
            let group = ("[A-Za-z ]{1,12}", prop::collection::vec(field_strategy(), 1..5))
                .prop_map(|(title, fields)| QuestionGroup { title, fields });
            prop::collection::vec(group, 1..4).prop_map(|groups| FormConfig { groups })
        }

        fn blank_edits() -> impl Strategy<Value = Vec<(Index, String)>> {
            prop::collection::vec((any::<Index>(), "[ \t]{0,3}"), 0..10)
        }

        /// Timers are spawned on submit, so each case runs inside a runtime
        fn with_engine<T>(config: FormConfig, f: impl FnOnce(&mut FormEngine) -> T) -> T {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .unwrap();
            let _guard = rt.enter();
            let (tx, _rx) = mpsc::unbounded_channel();
            let mut engine = FormEngine::new(config, FlagTimings::default(), tx);
            f(&mut engine)
        }

        fn apply_edits(engine: &mut FormEngine, edits: &[(Index, String)]) {
            let count = engine.config().field_count();
            for (index, value) in edits {
                let name = engine.config().field_at(index.index(count)).unwrap().name.clone();
                engine.on_field_change(&name, value.clone());
            }
        }

        proptest! {
            #[test]
            fn prop_blank_values_are_rejected(
                config in config_strategy(),
                edits in blank_edits(),
            ) {
                with_engine(config, |engine| -> Result<(), TestCaseError> {
                    apply_edits(engine, &edits);
                    let before = engine.values().clone();

                    prop_assert_eq!(engine.on_submit(&mut never_called()), SubmitOutcome::Rejected);
                    prop_assert_eq!(engine.flag(), TransientFlag::Error);
                    prop_assert_eq!(engine.values(), &before);
                    Ok(())
                })?;
            }

            #[test]
            fn prop_one_non_blank_value_submits_once(
                config in config_strategy(),
                edits in blank_edits(),
                filled in any::<Index>(),
                value in "[ ]{0,2}[A-Za-z0-9]{1,6}[ ]{0,2}",
            ) {
                with_engine(config, |engine| -> Result<(), TestCaseError> {
                    apply_edits(engine, &edits);
                    apply_edits(engine, &[(filled, value)]);
                    let expected = engine.values().clone();

                    let mut sink = MockSubmissionSink::new();
                    sink.expect_consume()
                        .withf(move |snapshot| snapshot == &expected)
                        .times(1)
                        .return_const(());

                    prop_assert_eq!(engine.on_submit(&mut sink), SubmitOutcome::Submitted);
                    prop_assert!(engine.values().is_empty());
                    prop_assert_eq!(engine.flag(), TransientFlag::Success);
                    Ok(())
                })?;
            }

            #[test]
            fn prop_any_edit_clears_error(
                config in config_strategy(),
                name in "[a-z_]{0,10}",
                value in ".{0,8}",
            ) {
                with_engine(config, |engine| -> Result<(), TestCaseError> {
                    engine.on_submit(&mut never_called());
                    prop_assert_eq!(engine.flag(), TransientFlag::Error);

                    engine.on_field_change(&name, value);
                    prop_assert_eq!(engine.flag(), TransientFlag::None);
                    Ok(())
                })?;
            }
        }
    }

    #[test]
    fn test_flag_messages() {
        assert_eq!(TransientFlag::None.message(), None);
        assert_eq!(
            TransientFlag::Success.message(),
            Some("Form Submitted Successfully!")
        );
        assert_eq!(TransientFlag::Error.message(), Some("Please complete form"));
    }

    #[test]
    fn test_default_timings() {
        let timings = FlagTimings::default();
        assert_eq!(timings.error, Duration::from_millis(3000));
        assert_eq!(timings.success, Duration::from_millis(5000));
    }
}
