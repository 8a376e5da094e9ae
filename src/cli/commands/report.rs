use std::collections::BTreeMap;

use crate::cli::args::{parse_amount, parse_month, ArgMap};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::Config;
use crate::core::services::{
    BudgetProgress, BudgetService, MonthlySummary, SavingsProgress, SummaryService,
};
use crate::ledger::{MonthKey, TargetBook};

const MONTH_PREFIXES: &[&str] = &["m", "y"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show income, expenses, top categories and tags for a month",
            "summary [m/MONTH] [y/YEAR]",
            cmd_summary,
        ),
        CommandEntry::new(
            "setbudget",
            "Set the budget for a month",
            "setbudget AMOUNT [m/MONTH] [y/YEAR]",
            cmd_set_budget,
        ),
        CommandEntry::new(
            "trackbudget",
            "Show the budget and what remains of it for a month",
            "trackbudget [m/MONTH] [y/YEAR]",
            cmd_track_budget,
        ),
        CommandEntry::new(
            "setsavings",
            "Set the savings goal for a month",
            "setsavings AMOUNT [m/MONTH] [y/YEAR]",
            cmd_set_savings,
        ),
        CommandEntry::new(
            "tracksavings",
            "Show progress towards the savings goal for a month",
            "tracksavings [m/MONTH] [y/YEAR]",
            cmd_track_savings,
        ),
        CommandEntry::new(
            "targets",
            "List every month with a budget or savings goal",
            "targets",
            cmd_targets,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let month = parse_month(&ArgMap::parse(args, MONTH_PREFIXES))?;
    let summary =
        SummaryService::monthly_summary(&context.ledger, month, context.config.top_categories);
    output::info(render_summary(&summary, &context.config));
    Ok(())
}

fn cmd_set_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (amount, month) = target_args(args)?;
    BudgetService::set_budget(&mut context.ledger, month, amount)?;
    context.persist()?;
    output::success(format!(
        "Budget of {} has been set for {month}.",
        context.config.money(amount)
    ));
    Ok(())
}

fn cmd_track_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let month = parse_month(&ArgMap::parse(args, MONTH_PREFIXES))?;
    let progress = BudgetService::budget_progress(&context.ledger, month);
    output::info(render_budget(month, progress.as_ref(), &context.config));
    Ok(())
}

fn cmd_set_savings(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (amount, month) = target_args(args)?;
    BudgetService::set_savings_goal(&mut context.ledger, month, amount)?;
    context.persist()?;
    output::success(format!(
        "Savings goal of {} has been set for {month}.",
        context.config.money(amount)
    ));
    Ok(())
}

fn cmd_track_savings(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let month = parse_month(&ArgMap::parse(args, MONTH_PREFIXES))?;
    let progress = BudgetService::savings_progress(&context.ledger, month);
    output::info(render_savings(month, progress.as_ref(), &context.config));
    Ok(())
}

fn cmd_targets(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(render_targets(context.ledger.targets(), &context.config));
    Ok(())
}

fn target_args(args: &[&str]) -> Result<(f64, MonthKey), CommandError> {
    let parsed = ArgMap::parse(args, MONTH_PREFIXES);
    let amount = parsed
        .positional()
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("missing amount".into()))
        .and_then(|raw| parse_amount(raw))?;
    Ok((amount, parse_month(&parsed)?))
}

pub(crate) fn render_summary(summary: &MonthlySummary, config: &Config) -> String {
    let month = summary.month;
    let mut text = format!("Financial Summary for {month}:\n\n");
    text.push_str(&format!(
        "Total Income: {}\n",
        config.money(summary.total_income)
    ));
    text.push_str(&format!(
        "Total Expenses: {}\n",
        config.money(summary.total_expense)
    ));

    if !summary.top_categories.is_empty() {
        text.push_str("\nTop Expense Categories:\n");
        for (rank, (category, amount)) in summary.top_categories.iter().enumerate() {
            text.push_str(&format!("{}. {category}: {}\n", rank + 1, config.money(*amount)));
        }
    }

    text.push('\n');
    match summary.budget {
        Some(budget) => {
            text.push_str(&format!("Budget for {month}: {}\n", config.money(budget)))
        }
        None => text.push_str(&format!("No budget set for {month}\n")),
    }

    if !summary.tags.is_empty() {
        text.push_str("\nTags Summary:\n");
        for (rank, (tag, amount)) in summary.tags.iter().enumerate() {
            text.push_str(&format!("{}. {tag}: {}\n", rank + 1, config.money(*amount)));
        }
    }
    text.trim_end().to_string()
}

pub(crate) fn render_targets(targets: &TargetBook, config: &Config) -> String {
    let mut months: BTreeMap<MonthKey, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for (month, amount) in targets.budgets() {
        months.entry(month).or_default().0 = Some(amount);
    }
    for (month, amount) in targets.savings_goals() {
        months.entry(month).or_default().1 = Some(amount);
    }
    if months.is_empty() {
        return "No budgets or savings goals set.".to_string();
    }

    let show = |amount: Option<f64>| amount.map_or_else(|| "-".to_string(), |a| config.money(a));
    let mut text = String::from("Monthly targets:");
    for (month, (budget, goal)) in months {
        text.push_str(&format!(
            "\n{month}: budget {}, savings goal {}",
            show(budget),
            show(goal)
        ));
    }
    text
}

pub(crate) fn render_budget(
    month: MonthKey,
    progress: Option<&BudgetProgress>,
    config: &Config,
) -> String {
    match progress {
        None => format!("No budget set for {month}."),
        Some(progress) => format!(
            "Budget for {month}: {}\n\nYour remaining budget for {month}: {}",
            config.money(progress.budget),
            config.money(progress.remaining)
        ),
    }
}

pub(crate) fn render_savings(
    month: MonthKey,
    progress: Option<&SavingsProgress>,
    config: &Config,
) -> String {
    let Some(progress) = progress else {
        return format!("No savings goal set for {month}.");
    };
    let mut text = format!(
        "Savings goal for {month}: {}\nTotal savings for {month}: {}\n\n",
        config.money(progress.goal),
        config.money(progress.savings)
    );
    if progress.goal_met() {
        text.push_str("Congratulations! You have met your savings goal.");
    } else {
        text.push_str(&format!(
            "You need {} more to reach your savings goal.",
            config.money(progress.shortfall())
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::{context, run};
    use crate::ledger::Category;

    fn april() -> MonthKey {
        MonthKey::new(4, 2025).unwrap()
    }

    #[test]
    fn summary_report_layout() {
        let summary = MonthlySummary {
            month: april(),
            total_income: 3000.0,
            total_expense: 25.5,
            top_categories: vec![(Category::Food, 25.5)],
            tags: vec![("Work".into(), 3025.5)],
            budget: None,
        };
        let expected = "Financial Summary for April 2025:\n\n\
                        Total Income: $3000.00\n\
                        Total Expenses: $25.50\n\n\
                        Top Expense Categories:\n\
                        1. Food: $25.50\n\n\
                        No budget set for April 2025\n\n\
                        Tags Summary:\n\
                        1. Work: $3025.50";
        assert_eq!(render_summary(&summary, &Config::default()), expected);
    }

    #[test]
    fn summary_omits_empty_sections() {
        let summary = MonthlySummary {
            month: april(),
            total_income: 0.0,
            total_expense: 0.0,
            top_categories: vec![],
            tags: vec![],
            budget: Some(1500.0),
        };
        let rendered = render_summary(&summary, &Config::default());
        assert!(!rendered.contains("Top Expense Categories"));
        assert!(!rendered.contains("Tags Summary"));
        assert!(rendered.ends_with("Budget for April 2025: $1500.00"));
    }

    #[test]
    fn budget_report_shows_negative_remaining() {
        let progress = BudgetProgress {
            month: april(),
            budget: 1500.0,
            income: 4700.50,
            expense: 427.49,
            remaining: 1500.0 - (4700.50 - 427.49),
        };
        assert_eq!(
            render_budget(april(), Some(&progress), &Config::default()),
            "Budget for April 2025: $1500.00\n\n\
             Your remaining budget for April 2025: $-2773.01"
        );
        assert_eq!(
            render_budget(april(), None, &Config::default()),
            "No budget set for April 2025."
        );
    }

    #[test]
    fn savings_report_reports_shortfall() {
        let progress = SavingsProgress {
            month: april(),
            goal: 500.0,
            income: 400.0,
            expense: 100.0,
            savings: 300.0,
        };
        let rendered = render_savings(april(), Some(&progress), &Config::default());
        assert!(rendered.contains("Total savings for April 2025: $300.00"));
        assert!(rendered.ends_with("You need $200.00 more to reach your savings goal."));
    }

    #[test]
    fn set_and_track_budget_through_commands() {
        let (mut context, _dir) = context();
        run(&mut context, "income 4700.50 d/Salary date/2025-04-01").unwrap();
        run(&mut context, "expense 427.49 d/Rent c/Bills date/2025-04-02").unwrap();
        run(&mut context, "setbudget 1500 m/4 y/2025").unwrap();

        let progress = BudgetService::budget_progress(&context.ledger, april()).unwrap();
        assert!((progress.remaining - -2773.01).abs() < 1e-9);
        assert!(run(&mut context, "trackbudget m/4 y/2025").is_ok());
    }

    #[test]
    fn targets_lists_months_in_order() {
        let mut book = TargetBook::new();
        assert_eq!(
            render_targets(&book, &Config::default()),
            "No budgets or savings goals set."
        );
        book.set_budget(april(), 1500.0);
        book.set_savings_goal(april(), 200.0);
        book.set_savings_goal(MonthKey::new(1, 2025).unwrap(), 50.0);
        assert_eq!(
            render_targets(&book, &Config::default()),
            "Monthly targets:\n\
             January 2025: budget -, savings goal $50.00\n\
             April 2025: budget $1500.00, savings goal $200.00"
        );
    }

    #[test]
    fn targets_reject_bad_input() {
        let (mut context, _dir) = context();
        assert!(run(&mut context, "setbudget").is_err());
        assert!(run(&mut context, "setbudget -5 m/4 y/2025").is_err());
        assert!(run(&mut context, "setsavings 100 m/13 y/2025").is_err());
        assert_eq!(context.ledger.targets().budget(april()), None);
    }
}
