use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::period::MonthKey;

/// Per-month spending budgets and savings goals.
///
/// Unset months read back as `None`; a later write for the same month
/// replaces the earlier one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TargetBook {
    #[serde(default, with = "month_map")]
    budgets: BTreeMap<MonthKey, f64>,
    #[serde(default, with = "month_map")]
    savings_goals: BTreeMap<MonthKey, f64>,
}

impl TargetBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_budget(&mut self, month: MonthKey, amount: f64) {
        tracing::debug!(%month, amount, "budget set");
        self.budgets.insert(month, amount);
    }

    pub fn budget(&self, month: MonthKey) -> Option<f64> {
        self.budgets.get(&month).copied()
    }

    pub fn set_savings_goal(&mut self, month: MonthKey, amount: f64) {
        tracing::debug!(%month, amount, "savings goal set");
        self.savings_goals.insert(month, amount);
    }

    pub fn savings_goal(&self, month: MonthKey) -> Option<f64> {
        self.savings_goals.get(&month).copied()
    }

    pub fn budgets(&self) -> impl Iterator<Item = (MonthKey, f64)> + '_ {
        self.budgets.iter().map(|(month, amount)| (*month, *amount))
    }

    pub fn savings_goals(&self) -> impl Iterator<Item = (MonthKey, f64)> + '_ {
        self.savings_goals
            .iter()
            .map(|(month, amount)| (*month, *amount))
    }

    pub fn clear(&mut self) {
        self.budgets.clear();
        self.savings_goals.clear();
    }
}

/// JSON object keys must be strings, so month maps travel as entry lists.
mod month_map {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::ledger::period::MonthKey;

    #[derive(Serialize, Deserialize)]
    struct Entry {
        #[serde(flatten)]
        month: MonthKey,
        amount: f64,
    }

    pub fn serialize<S>(map: &BTreeMap<MonthKey, f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let entries: Vec<Entry> = map
            .iter()
            .map(|(month, amount)| Entry {
                month: *month,
                amount: *amount,
            })
            .collect();
        entries.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<MonthKey, f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<Entry>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|entry| (entry.month, entry.amount))
            .collect())
    }
}
