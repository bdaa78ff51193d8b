use courier_lib::{
    dispatch_all, DeliveryTier, DispatchOptions, DispatchQueue, DispatchSession, DispatchSummary,
    Error, LocationId, NetworkConfig, OrderRequest, RenderMode,
};

fn available(codes: &[&str]) -> DispatchQueue {
    DispatchQueue::with_available(codes.iter().copied().map(LocationId::from))
}

fn session() -> DispatchSession {
    DispatchSession::from_config(&NetworkConfig::builtin()).expect("builtin session")
}

#[test]
fn expedited_orders_precede_standard_regardless_of_arrival() {
    let mut queue = available(&["B", "C"]);
    queue.enqueue("X", DeliveryTier::Expedited, "B").unwrap();
    queue.enqueue("Y", DeliveryTier::Standard, "B").unwrap();
    queue.enqueue("Z", DeliveryTier::Expedited, "C").unwrap();

    let order: Vec<_> = std::iter::from_fn(|| queue.dequeue())
        .map(|order| order.name().to_string())
        .collect();
    assert_eq!(order, ["X", "Z", "Y"]);
}

#[test]
fn rejected_order_does_not_change_queue_size() {
    let mut queue = available(&["A", "B"]);
    queue.enqueue("kept", DeliveryTier::Standard, "A").unwrap();

    let err = queue
        .enqueue("dropped", DeliveryTier::Expedited, "Z")
        .expect_err("Z is not available today");
    assert_eq!(err.to_string(), "location Z is not available for delivery today");
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.tier_len(DeliveryTier::Expedited), 0);
}

#[test]
fn duplicate_order_names_are_both_queued() {
    let mut queue = available(&["A"]);
    queue.enqueue("same", DeliveryTier::Standard, "A").unwrap();
    queue.enqueue("same", DeliveryTier::Standard, "A").unwrap();
    assert_eq!(queue.len(), 2);
}

#[test]
fn reference_session_trace_chains_positions() {
    let mut session = session();
    session.set_available_locations(["B", "D", "G"]).unwrap();
    session.enqueue("rice", DeliveryTier::Standard, "G").unwrap();
    session.enqueue("medicine", DeliveryTier::Expedited, "D").unwrap();
    session.enqueue("letters", DeliveryTier::Expedited, "B").unwrap();

    let plan = session.dispatch(false);
    let legs: Vec<_> = plan
        .legs
        .iter()
        .map(|leg| {
            (
                leg.order.name(),
                leg.from.as_str(),
                leg.to.as_str(),
                leg.distance,
            )
        })
        .collect();

    assert_eq!(
        legs,
        [
            ("medicine", "A", "D", Some(60)),
            ("letters", "D", "B", Some(40)),
            ("rice", "B", "G", Some(300)),
        ]
    );
    assert_eq!(plan.total_distance(), 400);
    assert_eq!(plan.finish().as_str(), "G");
    assert!(session.queue().is_empty());
}

#[test]
fn dispatch_start_is_an_explicit_option() {
    let (_, graph) = NetworkConfig::builtin().build().unwrap();
    let mut from_a = available(&["C"]);
    let mut from_d = available(&["C"]);
    from_a.enqueue("p", DeliveryTier::Standard, "C").unwrap();
    from_d.enqueue("p", DeliveryTier::Standard, "C").unwrap();

    let plan_a = dispatch_all(&mut from_a, &graph, &DispatchOptions::from_start("A"));
    let plan_d = dispatch_all(&mut from_d, &graph, &DispatchOptions::from_start("D"));
    assert_eq!(plan_a.legs[0].distance, Some(50));
    assert_eq!(plan_d.legs[0].distance, Some(70));
}

#[test]
fn session_can_be_reused_after_reset() {
    let mut session = session();
    session.enqueue("first", DeliveryTier::Expedited, "B").unwrap();
    let _ = session.dispatch(false);

    session.reset();
    assert!(matches!(
        session.enqueue("second", DeliveryTier::Standard, "B"),
        Err(Error::UnavailableLocation { .. })
    ));

    session.set_available_locations(["C"]).unwrap();
    session.enqueue("second", DeliveryTier::Standard, "C").unwrap();
    let plan = session.dispatch(false);
    assert_eq!(plan.legs.len(), 1);
    assert_eq!(plan.legs[0].from.as_str(), "A");
}

#[test]
fn summary_renders_no_path_for_unreachable_leg() {
    let mut config = NetworkConfig::builtin();
    config.routes.retain(|route| route.to.as_str() != "H");
    let mut session = DispatchSession::from_config(&config).unwrap();
    session.enqueue("north", DeliveryTier::Standard, "H").unwrap();

    let plan = session.dispatch(true);
    let summary = DispatchSummary::from_plan(session.catalog(), &plan);
    let text = summary.render(RenderMode::PlainText);

    assert_eq!(summary.unreachable, 1);
    assert!(summary.legs[0].path.is_none());
    assert!(text.contains("A (Colombo) -> H (Anuradhapura): no path found"));
    assert!(text.contains("1 deliveries had no path"));
}

#[test]
fn empty_plan_summarises_as_zero_deliveries() {
    let mut session = session();
    let plan = session.dispatch(false);
    let summary = DispatchSummary::from_plan(session.catalog(), &plan);

    assert_eq!(summary.deliveries, 0);
    assert_eq!(summary.total_distance, 0);
    assert_eq!(summary.unreachable, 0);
    assert_eq!(summary.finish, summary.start);
    assert_eq!(summary.start.code.as_str(), "A");

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["legs"], serde_json::json!([]));
    assert_eq!(json["finish"]["code"], "A");
}

#[test]
fn summary_serialises_to_json() {
    let mut session = session();
    let requests = [
        OrderRequest::new("tea", DeliveryTier::Standard, "Kandy"),
        OrderRequest::new("rice", DeliveryTier::Expedited, "B"),
    ];
    assert_eq!(session.submit_all(&requests).accepted, 2);

    let plan = session.dispatch(true);
    let summary = DispatchSummary::from_plan(session.catalog(), &plan);
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["deliveries"], 2);
    assert_eq!(json["total_distance"], 60);
    assert_eq!(json["legs"][0]["order"], "rice");
    assert_eq!(json["legs"][0]["tier"], "expedited");
    assert_eq!(json["legs"][1]["to"]["label"], "Kandy");
    assert_eq!(json["legs"][1]["path"][1]["code"], "D");
}
