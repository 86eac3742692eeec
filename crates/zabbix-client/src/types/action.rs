use serde::{Deserialize, Serialize};

use super::string_id_entity;

/// A Zabbix action: a filter over events and the operations it triggers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    /// Server-assigned id, empty until created
    #[serde(skip_serializing_if = "String::is_empty")]
    pub actionid: String,
    /// Unique action name
    pub name: String,
    /// Event source code, e.g. `"2"` for discovery
    pub eventsource: String,
    /// Conditions that select events
    pub filter: Filter,
    /// Operations run for selected events
    pub operations: Vec<Operation>,
}

/// A list of actions
pub type Actions = Vec<Action>;

/// Action filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    /// How conditions combine (and/or, and, or, custom)
    pub evaltype: String,
    /// Filter conditions
    pub conditions: Vec<Condition>,
}

/// A single filter condition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    /// Condition type code
    pub conditiontype: String,
    /// Comparison operator code
    pub operator: String,
    /// Value compared against
    pub value: String,
}

/// An operation performed by an action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Operation {
    /// Operation type code
    pub operationtype: String,
    /// Host groups for add/remove-from-group operations
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub opgroup: Vec<OperationGroup>,
    /// Templates for link/unlink operations
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub optemplate: Vec<OperationTemplate>,
    /// Remote command for command operations
    #[serde(skip_serializing_if = "String::is_empty")]
    pub opcommand: String,
}

/// Host group referenced by an operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationGroup {
    /// Host group id
    pub groupid: String,
}

/// Template referenced by an operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationTemplate {
    /// Template id
    pub templateid: String,
}

string_id_entity!(Action, actionid, "action", "actionids");
