//! OPC UA identifiers and fixed tables used by the nodes
//!
//! Centralized location for all hard-coded protocol values

/// Well-known namespace 0 node ids
pub mod node_ids {
    /// Server object, the usual root for event subscriptions
    pub const SERVER: &str = "ns=0;i=2253";

    /// BaseEventType, type definition for every select clause
    pub const BASE_EVENT_TYPE: u32 = 2041;
}

/// Standard event types offered by the event node form, by display name
pub const STANDARD_EVENT_TYPES: [(&str, &str); 7] = [
    ("BaseEventType", "ns=0;i=2041"),
    ("AlarmConditionType", "ns=0;i=2915"),
    ("LimitAlarmType", "ns=0;i=2955"),
    ("ExclusiveLevelAlarmType", "ns=0;i=9482"),
    ("NonExclusiveLevelAlarmType", "ns=0;i=10060"),
    ("OffNormalAlarmType", "ns=0;i=10637"),
    ("TripAlarmType", "ns=0;i=10751"),
];

/// Display name of a standard event type id
pub fn event_type_name(id: &str) -> Option<&'static str> {
    STANDARD_EVENT_TYPES
        .iter()
        .find(|(_, known)| *known == id)
        .map(|(name, _)| *name)
}

/// Event fields selected by every event node, in select-clause order
pub const EVENT_FIELDS: [&str; 27] = [
    // BaseEventType
    "EventId",
    "EventType",
    "SourceNode",
    "SourceName",
    "Time",
    "ReceiveTime",
    "Message",
    "Severity",
    // ConditionType
    "ConditionClassId",
    "ConditionClassName",
    "ConditionName",
    "BranchId",
    "Retain",
    "EnabledState",
    "Quality",
    "LastSeverity",
    "Comment",
    "ClientUserId",
    // AcknowledgeableConditionType
    "AckedState",
    "ConfirmedState",
    // AlarmConditionType
    "ActiveState",
    "InputNode",
    "SuppressedState",
    // LimitAlarmType
    "HighLimit",
    "LowLimit",
    "HighHighLimit",
    "LowLowLimit",
];

/// Locale attached to coerced LocalizedText values
pub const DEFAULT_LOCALE: &str = "en";

/// Suffix marking an array datatype name, e.g. "Double Array"
pub const ARRAY_SUFFIX: &str = " Array";

/// Maximum number of input arguments a method node can configure
pub const MAX_METHOD_ARGUMENTS: usize = 3;
