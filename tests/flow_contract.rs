//! Message contract seen by a downstream client node

use opcua_flow_nodes::constants::EVENT_FIELDS;
use opcua_flow_nodes::nodes::{Delivery, FlowEngine, Message, NodeRegistry, NodeState};
use serde_json::{json, Value};

const FLOW: &str = r#"[
    { "id": "ep", "type": "OpcUa-Endpoint", "endpoint": "opc.tcp://localhost:4840",
      "secpolicy": "Basic256Sha256", "secmode": "SIGN" },
    { "id": "level", "type": "OpcUa-Item", "name": "Level", "item": "ns=2;i=4",
      "datatype": "Double", "value": "66.6", "wires": [["client"]] },
    { "id": "alarms", "type": "OpcUa-Event", "name": "Alarms", "root": "ns=0;i=85",
      "eventtype": "ns=0;i=10751", "customeventtype": "", "activatecustomevent": false,
      "wires": [["events"]] },
    { "id": "client", "type": "OpcUa-Client", "endpoint": "ep", "action": "write" },
    { "id": "events", "type": "OpcUa-Client", "endpoint": "ep", "action": "events" }
]"#;

fn deliver(node_id: &str, msg: Value) -> Delivery {
    let registry = NodeRegistry::with_opcua_nodes();
    let mut engine = FlowEngine::from_json(&registry, FLOW).unwrap();
    let msg: Message = serde_json::from_value(msg).unwrap();
    let mut deliveries = engine.inject(node_id, msg).unwrap();
    assert_eq!(deliveries.len(), 1);
    deliveries.remove(0)
}

#[test]
fn item_message_shape() {
    let delivery = deliver("level", json!({ "payload": "", "source": "dashboard" }));
    assert_eq!(delivery.target.as_deref(), Some("client"));

    let out = serde_json::to_value(&delivery.message).unwrap();
    assert_eq!(out["topic"], json!("ns=2;i=4"));
    assert_eq!(out["datatype"], json!("Double"));
    assert_eq!(out["browseName"], json!("Level"));
    assert_eq!(out["payload"], json!(66.6));
    assert_eq!(out["source"], json!("dashboard"));
}

#[test]
fn item_message_datatype_shapes_payload_only() {
    let delivery = deliver("level", json!({ "payload": "7", "datatype": "UInt16" }));
    assert_eq!(delivery.message.payload, json!(7));
    assert_eq!(delivery.message.datatype.as_deref(), Some("Double"));
}

#[test]
fn item_rejects_non_finite_payload() {
    let registry = NodeRegistry::with_opcua_nodes();
    let mut engine = FlowEngine::from_json(&registry, FLOW).unwrap();
    let msg: Message = serde_json::from_value(json!({ "payload": "NaN" })).unwrap();
    assert!(engine.inject("level", msg).unwrap().is_empty());
    assert!(matches!(engine.node_state("level"), Some(NodeState::Error(_))));
}

#[test]
fn event_message_shape() {
    let delivery = deliver("alarms", json!({ "payload": "" }));
    assert_eq!(delivery.target.as_deref(), Some("events"));

    let out = serde_json::to_value(&delivery.message).unwrap();
    assert_eq!(out["topic"], json!("ns=0;i=85"));
    assert_eq!(out["eventTypeIds"], json!("ns=0;i=10751"));
    assert_eq!(out["eventFields"], json!(EVENT_FIELDS));
    assert_eq!(out["eventFilter"]["selectClauses"].as_array().unwrap().len(), 27);
    assert_eq!(
        out["eventFilter"]["selectClauses"][0]["browsePath"][0]["name"],
        json!("EventId")
    );
}

#[test]
fn endpoint_is_deployed_but_silent() {
    let registry = NodeRegistry::with_opcua_nodes();
    let mut engine = FlowEngine::from_json(&registry, FLOW).unwrap();
    let endpoint = engine.node("ep").and_then(|node| node.as_endpoint()).unwrap();
    assert_eq!(endpoint.endpoint_url, "opc.tcp://localhost:4840");
    assert!(engine.inject("ep", Message::default()).unwrap().is_empty());
}
