use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, warn};

use crate::entities::{FormState, FormView, GraphQLRequest, Notification, RequestStatus, Section};
use crate::error::{Fault, SubmitError, ValidationError};
use crate::use_cases::ports::{GraphQLTransport, Notifier};

/// What distinguishes one form from another: its fields, the operation it
/// sends and how the response is shown
pub trait FormKind: Send + Sync + 'static {
    type Output: fmt::Debug + Clone + Send + Sync + 'static;

    const TITLE: &'static str;
    /// Root field named in the fault notification
    const OPERATION: &'static str;
    const SUBMIT_LABEL: &'static str = "Search";
    const BUSY_LABEL: &'static str = "Searching...";

    fn initial_form() -> FormState;

    /// Validate the fields and build the operation. Every failed check is
    /// reported.
    fn prepare(form: &FormState) -> Result<GraphQLRequest, Vec<ValidationError>>;

    /// Project the `data` member of a response
    fn decode(data: Value) -> Result<Self::Output, Fault>;

    /// Hook run when a response is applied, before results are replaced
    fn after_success(_form: &mut FormState, _output: &Self::Output) -> Option<Notification> {
        None
    }

    /// Result sections; `None` before the first successful response
    fn render(results: Option<&Self::Output>) -> Vec<Section>;
}

/// A submitted request stamped with its sequence number
#[derive(Debug)]
pub struct Ticket {
    sequence: u64,
    request: GraphQLRequest,
}

impl Ticket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn request(&self) -> &GraphQLRequest {
        &self.request
    }
}

/// Fate of a completed response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Applied,
    /// A newer submission was issued; the response was ignored
    Discarded,
}

/// State container of one form instance
pub struct FormController<K: FormKind> {
    form: FormState,
    status: RequestStatus,
    results: Option<K::Output>,
    last_issued: u64,
    kind: PhantomData<K>,
}

impl<K: FormKind> fmt::Debug for FormController<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("operation", &K::OPERATION)
            .field("form", &self.form)
            .field("status", &self.status)
            .field("results", &self.results)
            .field("last_issued", &self.last_issued)
            .finish()
    }
}

impl<K: FormKind> Default for FormController<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: FormKind> FormController<K> {
    pub fn new() -> Self {
        Self {
            form: K::initial_form(),
            status: RequestStatus::Idle,
            results: None,
            last_issued: 0,
            kind: PhantomData,
        }
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.form.set(name, value);
    }

    pub fn field(&self, name: &str) -> &str {
        self.form.get(name)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    pub fn loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn results(&self) -> Option<&K::Output> {
        self.results.as_ref()
    }

    /// Message shown when the operation fails
    pub fn fault_notice() -> String {
        format!("Encountered error executing the {} query", K::OPERATION)
    }

    /// Validate and stamp a new submission. On failure nothing changes
    /// except the notifications.
    pub fn begin(&mut self, notifier: &dyn Notifier) -> Result<Ticket, SubmitError> {
        let request = match K::prepare(&self.form) {
            Ok(request) => request,
            Err(errors) => {
                debug!(operation = K::OPERATION, ?errors, "submission rejected");
                notifier.dismiss();
                for error in &errors {
                    notifier.notify(Notification::error(error.to_string()));
                }
                return Err(SubmitError::Invalid(errors));
            }
        };

        self.last_issued += 1;
        self.status = RequestStatus::Loading;
        debug!(
            operation = K::OPERATION,
            sequence = self.last_issued,
            "submission issued"
        );
        Ok(Ticket {
            sequence: self.last_issued,
            request,
        })
    }

    /// Apply the outcome of a ticket, unless a newer one was issued since
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<Value, Fault>,
        notifier: &dyn Notifier,
    ) -> Result<Delivery, SubmitError> {
        if ticket.sequence != self.last_issued {
            debug!(
                operation = K::OPERATION,
                sequence = ticket.sequence,
                latest = self.last_issued,
                "discarding superseded response"
            );
            return Ok(Delivery::Discarded);
        }

        match outcome.and_then(K::decode) {
            Ok(output) => {
                if let Some(notification) = K::after_success(&mut self.form, &output) {
                    notifier.notify(notification);
                }
                self.results = Some(output);
                self.status = RequestStatus::Success;
                debug!(operation = K::OPERATION, sequence = ticket.sequence, "results applied");
                Ok(Delivery::Applied)
            }
            Err(fault) => {
                warn!(operation = K::OPERATION, error = %fault, "operation failed");
                let notice = Self::fault_notice();
                self.results = None;
                self.status = RequestStatus::Error(fault.to_string());
                notifier.dismiss();
                notifier.notify(Notification::error(notice.clone()));
                Err(SubmitError::Failed {
                    notice,
                    source: fault,
                })
            }
        }
    }

    /// Validate, send and apply in one go
    pub async fn submit<T>(
        &mut self,
        transport: &T,
        notifier: &dyn Notifier,
    ) -> Result<Delivery, SubmitError>
    where
        T: GraphQLTransport + ?Sized,
    {
        let ticket = self.begin(notifier)?;
        let outcome = transport.execute(ticket.request()).await;
        self.complete(ticket, outcome, notifier)
    }

    pub fn view(&self) -> FormView {
        let loading = self.loading();
        FormView {
            title: K::TITLE.to_string(),
            submit_label: (if loading { K::BUSY_LABEL } else { K::SUBMIT_LABEL }).to_string(),
            submit_enabled: !loading,
            sections: K::render(self.results.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{NotificationKind, Product};
    use crate::use_cases::forms::{fields, FindAvailableProductsForm, FindOffersAndProductsForm};
    use crate::NotificationCenter;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Answers with queued outcomes and remembers what it was sent
    struct CannedTransport {
        outcomes: Mutex<Vec<Result<Value, Fault>>>,
        sent: Mutex<Vec<GraphQLRequest>>,
    }

    impl CannedTransport {
        fn new(outcomes: Vec<Result<Value, Fault>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<GraphQLRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GraphQLTransport for CannedTransport {
        async fn execute(&self, request: &GraphQLRequest) -> Result<Value, Fault> {
            self.sent.lock().unwrap().push(request.clone());
            self.outcomes.lock().unwrap().remove(0)
        }
    }

    fn products(ids: &[&str]) -> Value {
        let list: Vec<_> = ids
            .iter()
            .map(|id| json!({"id": id, "name": format!("Gadget {id}"), "inventory": 1, "type": "gadget"}))
            .collect();
        json!({"findAvailableProducts": list})
    }

    fn ids(form: &FindAvailableProductsForm) -> Vec<String> {
        form.results()
            .map(|list| list.iter().flatten().map(|p: &Product| p.id.clone().unwrap_or_default()).collect())
            .unwrap_or_default()
    }

    fn filled() -> FindAvailableProductsForm {
        let mut form = FindAvailableProductsForm::new();
        form.set_field(fields::PAGE_SIZE, "10");
        form
    }

    #[tokio::test]
    async fn test_validation_failure_sends_nothing() {
        let transport = CannedTransport::new(Vec::new());
        let notifications = NotificationCenter::new();
        let mut form = FindAvailableProductsForm::new();
        form.set_field(fields::PAGE_SIZE, "0");

        let result = form.submit(&transport, &notifications).await;

        assert_eq!(
            result,
            Err(SubmitError::Invalid(vec![ValidationError::InvalidPageSize]))
        );
        assert!(transport.sent().is_empty());
        assert_eq!(form.status(), &RequestStatus::Idle);
        assert_eq!(
            notifications.visible(),
            vec![Notification::error("Page size must be a positive number")]
        );
    }

    #[tokio::test]
    async fn test_validation_failure_keeps_results() {
        let transport = CannedTransport::new(vec![Ok(products(&["1"]))]);
        let notifications = NotificationCenter::new();
        let mut form = filled();
        form.submit(&transport, &notifications).await.unwrap();

        form.set_field(fields::PAGE_SIZE, "abc");
        assert!(form.submit(&transport, &notifications).await.is_err());

        assert_eq!(ids(&form), vec!["1"]);
        assert_eq!(form.status(), &RequestStatus::Success);
    }

    #[tokio::test]
    async fn test_fault_clears_results_and_notifies_once() {
        let transport = CannedTransport::new(vec![
            Ok(products(&["1", "2"])),
            Err(Fault::Status(500)),
            Err(Fault::Status(500)),
        ]);
        let notifications = NotificationCenter::new();
        let mut form = filled();

        form.submit(&transport, &notifications).await.unwrap();
        assert_eq!(ids(&form), vec!["1", "2"]);

        let error = form.submit(&transport, &notifications).await.unwrap_err();
        assert_eq!(
            error.to_string(),
            "Encountered error executing the findAvailableProducts query"
        );
        assert!(form.results().is_none());
        assert!(matches!(form.status(), RequestStatus::Error(_)));

        form.submit(&transport, &notifications).await.unwrap_err();
        let visible = notifications.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].kind, NotificationKind::Error);
        assert_eq!(
            visible[0].message,
            "Encountered error executing the findAvailableProducts query"
        );
    }

    #[tokio::test]
    async fn test_undecodable_data_is_a_fault() {
        let transport = CannedTransport::new(vec![Ok(json!({"findAvailableProducts": "nope"}))]);
        let notifications = NotificationCenter::new();
        let mut form = filled();

        let error = form.submit(&transport, &notifications).await.unwrap_err();
        assert!(matches!(
            error,
            SubmitError::Failed {
                source: Fault::Decode(_),
                ..
            }
        ));
    }

    #[test]
    fn test_superseded_response_is_discarded() {
        let notifications = NotificationCenter::new();
        let mut form = filled();

        let first = form.begin(&notifications).unwrap();
        let second = form.begin(&notifications).unwrap();
        assert!(second.sequence() > first.sequence());

        let delivery = form
            .complete(second, Ok(products(&["new"])), &notifications)
            .unwrap();
        assert_eq!(delivery, Delivery::Applied);

        let delivery = form
            .complete(first, Err(Fault::Transport("reset".into())), &notifications)
            .unwrap();
        assert_eq!(delivery, Delivery::Discarded);

        assert_eq!(ids(&form), vec!["new"]);
        assert_eq!(form.status(), &RequestStatus::Success);
        assert!(notifications.history().is_empty());
    }

    #[test]
    fn test_stale_success_does_not_end_loading() {
        let notifications = NotificationCenter::new();
        let mut form = filled();

        let first = form.begin(&notifications).unwrap();
        let _second = form.begin(&notifications).unwrap();
        form.complete(first, Ok(products(&["old"])), &notifications)
            .unwrap();

        assert!(form.loading());
        assert!(form.results().is_none());
        assert!(!form.view().submit_enabled);
        assert_eq!(form.view().submit_label, "Searching...");
    }

    #[test]
    fn test_combined_reports_each_failed_check() {
        let notifications = NotificationCenter::new();
        let mut form = FindOffersAndProductsForm::new();
        form.set_field(fields::DATE, "not a date");
        form.set_field(fields::PAGE_SIZE, "-3");

        let error = form.begin(&notifications).unwrap_err();
        assert_eq!(
            error,
            SubmitError::Invalid(vec![
                ValidationError::InvalidDate,
                ValidationError::InvalidPageSize
            ])
        );
        let messages: Vec<_> = notifications
            .visible()
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(
            messages,
            vec!["Please enter a valid date", "Page size must be a positive number"]
        );
    }

    #[test]
    fn test_set_field_has_no_side_effects() {
        let mut form = FindAvailableProductsForm::new();
        form.set_field(fields::PAGE_SIZE, "garbage");
        form.set_field("unknown", "value");
        assert_eq!(form.field(fields::PAGE_SIZE), "garbage");
        assert_eq!(form.status(), &RequestStatus::Idle);
        assert!(form.results().is_none());
    }
}
