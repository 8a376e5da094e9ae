//! Budget and savings-goal bookkeeping against monthly ledger totals.

use crate::ledger::{Ledger, MonthKey};

use super::{validate_amount, ServiceResult, SummaryService};

/// Budget standing for one month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetProgress {
    pub month: MonthKey,
    pub budget: f64,
    pub income: f64,
    pub expense: f64,
    /// `budget - (income - expense)`.
    pub remaining: f64,
}

/// Savings standing for one month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsProgress {
    pub month: MonthKey,
    pub goal: f64,
    pub income: f64,
    pub expense: f64,
    /// `income - expense`.
    pub savings: f64,
}

impl SavingsProgress {
    pub fn goal_met(&self) -> bool {
        self.savings >= self.goal
    }

    /// Amount still needed to reach the goal; zero once met.
    pub fn shortfall(&self) -> f64 {
        (self.goal - self.savings).max(0.0)
    }
}

pub struct BudgetService;

impl BudgetService {
    pub fn set_budget(ledger: &mut Ledger, month: MonthKey, amount: f64) -> ServiceResult<()> {
        validate_amount(amount)?;
        ledger.targets_mut().set_budget(month, amount);
        Ok(())
    }

    pub fn set_savings_goal(ledger: &mut Ledger, month: MonthKey, amount: f64) -> ServiceResult<()> {
        validate_amount(amount)?;
        ledger.targets_mut().set_savings_goal(month, amount);
        Ok(())
    }

    /// `None` when no budget was set for `month`.
    pub fn budget_progress(ledger: &Ledger, month: MonthKey) -> Option<BudgetProgress> {
        let budget = ledger.targets().budget(month)?;
        let income = SummaryService::monthly_total_income(ledger, month);
        let expense = SummaryService::monthly_total_expense(ledger, month);
        Some(BudgetProgress {
            month,
            budget,
            income,
            expense,
            remaining: budget - (income - expense),
        })
    }

    /// `None` when no savings goal was set for `month`.
    pub fn savings_progress(ledger: &Ledger, month: MonthKey) -> Option<SavingsProgress> {
        let goal = ledger.targets().savings_goal(month)?;
        let income = SummaryService::monthly_total_income(ledger, month);
        let expense = SummaryService::monthly_total_expense(ledger, month);
        Some(SavingsProgress {
            month,
            goal,
            income,
            expense,
            savings: income - expense,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::ServiceError;
    use crate::ledger::{Category, Transaction};
    use chrono::NaiveDate;

    fn april() -> MonthKey {
        MonthKey::new(4, 2025).unwrap()
    }

    fn april_ledger() -> Ledger {
        let date = NaiveDate::from_ymd_opt(2025, 4, 12).unwrap();
        let mut ledger = Ledger::new();
        ledger.add(Transaction::income(4700.50, "Salary", date, vec![]));
        ledger.add(Transaction::expense(427.49, "Rent share", date, Category::Bills, vec![]));
        ledger
    }

    #[test]
    fn remaining_budget_subtracts_net_income() {
        let mut ledger = april_ledger();
        BudgetService::set_budget(&mut ledger, april(), 1500.0).unwrap();

        let progress = BudgetService::budget_progress(&ledger, april()).unwrap();
        assert_eq!(progress.budget, 1500.0);
        assert_eq!(progress.remaining, 1500.0 - (4700.50 - 427.49));
        assert!((progress.remaining - -2773.01).abs() < 1e-9);
    }

    #[test]
    fn unset_month_has_no_progress() {
        let ledger = april_ledger();
        let may = MonthKey::new(5, 2025).unwrap();
        assert_eq!(BudgetService::budget_progress(&ledger, may), None);
        assert_eq!(BudgetService::savings_progress(&ledger, may), None);
    }

    #[test]
    fn savings_goal_met_when_net_reaches_goal() {
        let mut ledger = april_ledger();
        BudgetService::set_savings_goal(&mut ledger, april(), 4000.0).unwrap();
        let progress = BudgetService::savings_progress(&ledger, april()).unwrap();
        assert!(progress.goal_met());
        assert_eq!(progress.shortfall(), 0.0);

        BudgetService::set_savings_goal(&mut ledger, april(), 5000.0).unwrap();
        let progress = BudgetService::savings_progress(&ledger, april()).unwrap();
        assert!(!progress.goal_met());
        assert!((progress.shortfall() - 726.99).abs() < 1e-9);
    }

    #[test]
    fn rejects_negative_targets() {
        let mut ledger = Ledger::new();
        let err = BudgetService::set_budget(&mut ledger, april(), -1.0)
            .expect_err("negative budget must fail");
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert_eq!(ledger.targets().budget(april()), None);
    }
}
