//! Panel behaviour end to end against a mock backend.

use std::time::{Duration, Instant};

use ops_dashboard::api::{ApiClient, Backend};
use ops_dashboard::models::RecordId;
use ops_dashboard::ui::agreement_panel::AgreementsPanel;
use ops_dashboard::ui::app::{Shell, Tab};
use ops_dashboard::ui::customers_panel::CustomersPanel;
use ops_dashboard::ui::dashboard::DashboardPanel;
use ops_dashboard::ui::invoice_panel::InvoicesPanel;
use ops_dashboard::ui::panel::{Panel, PanelEvent};
use ops_dashboard::ui::po_panel::PurchaseOrdersPanel;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend(server: &MockServer) -> Backend {
    let api = ApiClient::new(&server.uri(), None).unwrap();
    Backend::new(api, tokio::runtime::Handle::current())
}

/// Poll until the panel has nothing outstanding, returning the first event.
async fn settle<P: Panel>(panel: &mut P) -> Option<PanelEvent> {
    for _ in 0..300 {
        let event = panel.poll();
        if event.is_some() || !panel.is_busy() {
            return event;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("panel did not settle");
}

async fn mount_get(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_customer_then_reload_lists_it() {
    let server = MockServer::start().await;
    mount_get(&server, "/api/customers", json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/customers"))
        .and(body_json(json!({"name": "Acme Corp", "email": "ops@acme.com", "industry": "Fintech"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    let backend = backend(&server);

    let mut panel = CustomersPanel::default();
    panel.refresh(&backend);
    settle(&mut panel).await;
    assert!(panel.customers.items().is_empty());

    panel.draft.name = "Acme Corp".into();
    panel.draft.email = "ops@acme.com".into();
    panel.draft.industry = "Fintech".into();
    assert!(panel.submit(&backend));
    assert!(panel.is_submitting());

    assert_eq!(settle(&mut panel).await, Some(PanelEvent::Saved("customer")));
    assert!(panel.draft.name.is_empty());
    assert!(panel.draft.email.is_empty());
    assert!(panel.draft.industry.is_empty());

    server.verify().await;

    // Backend now returns the new record; a reload mounts a fresh panel
    server.reset().await;
    mount_get(
        &server,
        "/api/customers",
        json!([{"id": 1, "name": "Acme Corp", "email": "ops@acme.com", "industry": "Fintech"}]),
    )
    .await;

    let mut reloaded = CustomersPanel::default();
    reloaded.refresh(&backend);
    settle(&mut reloaded).await;
    let names: Vec<_> = reloaded.customers.items().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Acme Corp"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_po_list_follows_customer_selection() {
    let server = MockServer::start().await;
    mount_get(&server, "/api/customers", json!([{"id": 7, "name": "Acme Corp"}])).await;
    mount_get(
        &server,
        "/api/pos",
        json!([
            {"id": 1, "po_number": "PO-1", "customer_id": 7},
            {"id": 2, "po_number": "PO-2", "customer_id": 8}
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/pos"))
        .and(query_param("customer_id", "7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "po_number": "PO-1", "customer_id": 7}])),
        )
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    let backend = backend(&server);

    let mut panel = PurchaseOrdersPanel::default();
    panel.refresh(&backend);
    settle(&mut panel).await;
    assert_eq!(panel.orders.items().len(), 2);

    panel.select_customer(Some(RecordId::new("7")));
    panel.refresh(&backend);
    // Same key again must not re-fetch
    panel.refresh(&backend);
    settle(&mut panel).await;

    let numbers: Vec<_> = panel.orders.items().iter().map(|po| po.po_number.as_str()).collect();
    assert_eq!(numbers, ["PO-1"]);
    assert_eq!(panel.orders.key(), Some(&Some(RecordId::new("7"))));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invoice_list_follows_po_selection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 7, "name": "Acme Corp"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/pos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "po_number": "PO-3", "customer_id": 7},
            {"id": 4, "po_number": "PO-4", "customer_id": 7}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    mount_get(
        &server,
        "/api/invoices",
        json!([
            {"id": 1, "invoice_number": "INV-1", "po_id": 3},
            {"id": 2, "invoice_number": "INV-2", "po_id": 4}
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/invoices"))
        .and(query_param("po_id", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "invoice_number": "INV-1", "po_id": 3}])),
        )
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    let backend = backend(&server);

    let mut panel = InvoicesPanel::default();
    panel.refresh(&backend);
    settle(&mut panel).await;
    assert_eq!(panel.invoices.items().len(), 2);
    assert_eq!(panel.orders.items().len(), 2);

    panel.select_po(Some(RecordId::new("3")));
    panel.refresh(&backend);
    panel.refresh(&backend);
    settle(&mut panel).await;

    let numbers: Vec<_> = panel.invoices.items().iter().map(|inv| inv.invoice_number.as_str()).collect();
    assert_eq!(numbers, ["INV-1"]);
    // The PO select stays unfiltered
    assert_eq!(panel.orders.items().len(), 2);
    assert_eq!(panel.invoices.key(), Some(&Some(RecordId::new("3"))));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_write_survives_leaving_the_tab() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/customers"))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_millis(50)))
        .expect(1)
        .mount(&server)
        .await;
    let backend = backend(&server);

    let mut shell = Shell::default();
    shell.select_tab(Tab::Customers);
    shell.panels.customers.draft.name = "Acme Corp".into();
    assert!(shell.panels.customers.submit(&backend));

    shell.select_tab(Tab::Dashboard);
    assert!(!shell.panels.customers.is_submitting());
    assert!(shell.has_detached_writes());

    let delay = Duration::from_millis(300);
    for _ in 0..300 {
        shell.poll_detached_writes(Instant::now(), delay);
        if !shell.has_detached_writes() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert!(!shell.has_detached_writes());
    assert!(shell.reload_pending());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invoice_without_po_is_not_sent() {
    let server = MockServer::start().await;
    mount_get(&server, "/api/customers", json!([{"id": 7, "name": "Acme Corp"}])).await;
    mount_get(&server, "/api/pos", json!([])).await;
    mount_get(&server, "/api/invoices", json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/invoices"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    let backend = backend(&server);

    let mut panel = InvoicesPanel::default();
    panel.refresh(&backend);
    settle(&mut panel).await;

    panel.select_customer(Some(RecordId::new("7")));
    panel.draft.invoice_number = "INV-1".into();
    panel.draft.amount = "250".into();
    assert!(!panel.submit(&backend));
    assert!(!panel.is_submitting());
    assert_eq!(panel.draft.invoice_number, "INV-1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_required_fields_send_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    let backend = backend(&server);

    let mut customers = CustomersPanel::default();
    customers.draft.email = "ops@acme.com".into();
    customers.draft.name = "   ".into();
    assert!(!customers.submit(&backend));

    let mut orders = PurchaseOrdersPanel::default();
    orders.draft.po_number = "PO-1".into();
    assert!(!orders.submit(&backend));

    let mut orders = PurchaseOrdersPanel::default();
    orders.select_customer(Some(RecordId::new("7")));
    orders.draft.po_number = "PO-1".into();
    orders.draft.amount = "twelve".into();
    assert!(!orders.submit(&backend));

    let mut invoices = InvoicesPanel::default();
    invoices.select_po(Some(RecordId::new("3")));
    invoices.draft.invoice_number = "INV-1".into();
    assert!(!invoices.submit(&backend));

    let mut agreements = AgreementsPanel::default();
    agreements.draft.customer_id = Some(RecordId::new("7"));
    assert!(!agreements.submit(&backend));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_write_keeps_draft() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/agreements"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;
    let backend = backend(&server);

    let mut panel = AgreementsPanel::default();
    panel.draft.customer_id = Some(RecordId::new("7"));
    panel.draft.name = "Master Services".into();
    assert!(panel.submit(&backend));

    // Only the submission is driven here; the lists were never requested
    for _ in 0..300 {
        if panel.poll().is_some() || !panel.is_submitting() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert!(!panel.is_submitting());
    assert_eq!(panel.draft.name, "Master Services");
    assert!(panel.error().is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dashboard_empty_summary_reads_zero() {
    let server = MockServer::start().await;
    mount_get(&server, "/api/dashboard-summary", json!({})).await;
    let backend = backend(&server);

    let mut panel = DashboardPanel::default();
    panel.refresh(&backend);
    settle(&mut panel).await;

    let values = panel.counters("₹").map(|c| c.value);
    assert_eq!(values, ["0", "0", "0", "₹0"]);
    assert!(panel.error().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dashboard_failure_reports_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard-summary"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let backend = backend(&server);

    let mut panel = DashboardPanel::default();
    panel.refresh(&backend);
    settle(&mut panel).await;

    assert!(!panel.is_busy());
    assert!(panel.error().is_some());
}
