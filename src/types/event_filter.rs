//! Event filter handed to the client when subscribing to events
//!
//! The filter itself is the stack's `EventFilter`. Messages carry it as JSON,
//! so this module also renders the parts the client reads back.

use opcua::types::{
    AttributeId, ContentFilter, EventFilter, NodeId, QualifiedName, SimpleAttributeOperand,
    UAString,
};
use serde_json::{json, Value};

use crate::constants::node_ids;
use crate::types::variant::ua_text;

/// Value of a BaseEventType field; dotted names become multi-segment paths
pub fn event_field(field: &str) -> SimpleAttributeOperand {
    SimpleAttributeOperand {
        type_definition_id: NodeId::new(0, node_ids::BASE_EVENT_TYPE),
        browse_path: Some(field.split('.').map(|segment| QualifiedName::new(0, segment)).collect()),
        attribute_id: AttributeId::Value as u32,
        index_range: UAString::null(),
    }
}

/// One select clause per field, in order, with no where clause
pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> EventFilter {
    EventFilter {
        select_clauses: Some(fields.iter().map(|field| event_field(field.as_ref())).collect()),
        where_clause: ContentFilter { elements: None },
    }
}

fn browse_path(operand: &SimpleAttributeOperand) -> &[QualifiedName] {
    operand.browse_path.as_deref().unwrap_or_default()
}

/// Field names in select-clause order
pub fn field_names(filter: &EventFilter) -> Vec<String> {
    filter
        .select_clauses
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|clause| {
            browse_path(clause)
                .iter()
                .map(|segment| ua_text(&segment.name))
                .collect::<Vec<&str>>()
                .join(".")
        })
        .collect()
}

/// JSON form carried on `msg.eventFilter`
pub fn to_json(filter: &EventFilter) -> Value {
    let select_clauses: Vec<Value> = filter
        .select_clauses
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|clause| {
            let path: Vec<Value> = browse_path(clause)
                .iter()
                .map(|segment| {
                    json!({
                        "namespaceIndex": segment.namespace_index,
                        "name": ua_text(&segment.name),
                    })
                })
                .collect();
            let mut operand = json!({
                "typeDefinitionId": clause.type_definition_id.to_string(),
                "browsePath": path,
                "attributeId": clause.attribute_id,
            });
            if !clause.index_range.is_null() {
                operand["indexRange"] = json!(ua_text(&clause.index_range));
            }
            operand
        })
        .collect();
    let elements: Vec<Value> = filter
        .where_clause
        .elements
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|element| json!({ "filterOperator": format!("{:?}", element.filter_operator) }))
        .collect();
    json!({
        "selectClauses": select_clauses,
        "whereClause": { "elements": elements },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_clause_per_field() {
        let filter = from_fields(&["EventId", "EnabledState.Id"]);
        let clauses = filter.select_clauses.as_deref().unwrap();
        assert_eq!(clauses.len(), 2);
        assert_eq!(browse_path(&clauses[1]).len(), 2);
        assert_eq!(clauses[0].attribute_id, 13);
        assert_eq!(field_names(&filter), vec!["EventId", "EnabledState.Id"]);
        assert!(filter.where_clause.elements.is_none());
    }

    #[test]
    fn test_json_shape() {
        let filter = from_fields(&["Severity"]);
        assert_eq!(
            to_json(&filter),
            json!({
                "selectClauses": [{
                    "typeDefinitionId": "i=2041",
                    "browsePath": [{ "namespaceIndex": 0, "name": "Severity" }],
                    "attributeId": 13
                }],
                "whereClause": { "elements": [] }
            })
        );
    }
}
