use crate::cli::args::{parse_amount, parse_date, parse_positions, today, ArgMap, Positions};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::TransactionService;
use crate::ledger::{Category, Transaction, TransactionPatch};

const ENTRY_PREFIXES: &[&str] = &["d", "t", "c", "date"];
const EDIT_PREFIXES: &[&str] = &["a", "d", "t", "c", "date"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "income",
            "Record money received",
            "income AMOUNT d/DESCRIPTION [t/TAG]... [date/YYYY-MM-DD]",
            cmd_income,
        ),
        CommandEntry::new(
            "expense",
            "Record money spent",
            "expense AMOUNT d/DESCRIPTION [c/CATEGORY] [t/TAG]... [date/YYYY-MM-DD]",
            cmd_expense,
        ),
        CommandEntry::new(
            "list",
            "List transactions, most recent first",
            "list [n/COUNT] [d/YYYY-MM-DD]",
            cmd_list,
        ),
        CommandEntry::new(
            "view",
            "List only incomes or only expenses",
            "view income|expense",
            cmd_view,
        ),
        CommandEntry::new(
            "delete",
            "Delete a transaction or a range of transactions",
            "delete INDEX | delete START-END",
            cmd_delete,
        ),
        CommandEntry::new(
            "edit",
            "Change fields of a transaction",
            "edit INDEX [a/AMOUNT] [d/DESCRIPTION] [c/CATEGORY] [t/TAG]... [date/YYYY-MM-DD]",
            cmd_edit,
        ),
        CommandEntry::new(
            "search",
            "Find transactions by description",
            "search KEYWORD",
            cmd_search,
        ),
        CommandEntry::new(
            "filter",
            "Show transactions between two dates",
            "filter s/YYYY-MM-DD [e/YYYY-MM-DD]",
            cmd_filter,
        ),
        CommandEntry::new(
            "balance",
            "Show balance, total income and total expenses",
            "balance",
            cmd_balance,
        ),
        CommandEntry::new(
            "clear",
            "Delete all transactions, budgets and savings goals",
            "clear [confirm]",
            cmd_clear,
        ),
    ]
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ArgMap::parse(args, ENTRY_PREFIXES);
    let (amount, description, tags, date) = entry_fields(&parsed)?;
    if parsed.has("c") {
        return Err(CommandError::InvalidArguments(
            "incomes do not take a category".into(),
        ));
    }
    let transaction = Transaction::income(amount, description, date, tags);
    record(context, transaction, "Income")
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ArgMap::parse(args, ENTRY_PREFIXES);
    let (amount, description, tags, date) = entry_fields(&parsed)?;
    let category = Category::normalize(parsed.get("c"));
    let transaction = Transaction::expense(amount, description, date, category, tags);
    record(context, transaction, "Expense")
}

fn entry_fields(
    parsed: &ArgMap,
) -> Result<(f64, String, Vec<String>, chrono::NaiveDate), CommandError> {
    let amount = parsed
        .positional()
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("missing amount".into()))
        .and_then(|raw| parse_amount(raw))?;
    let description = parsed.require("d", "description")?.to_string();
    let date = match parsed.get("date") {
        Some(raw) => parse_date(raw)?,
        None => today(),
    };
    Ok((amount, description, parsed.all("t"), date))
}

fn record(context: &mut ShellContext, transaction: Transaction, label: &str) -> CommandResult {
    let max_tags = context.config.max_tags;
    let summary = transaction.to_string();
    TransactionService::record(&mut context.ledger, transaction, max_tags)?;
    context.persist()?;
    output::success(format!("{label} added: {summary}"));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ArgMap::parse(args, &["n", "d"]);
    let limit = match parsed.get("n") {
        Some(raw) => Some(raw.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments(format!("`{raw}` is not a valid count"))
        })?),
        None => None,
    };
    let since = parsed.get("d").map(parse_date).transpose()?;

    let rows: Vec<String> = context
        .ledger
        .list_indexed()
        .into_iter()
        .filter(|(_, transaction)| since.map_or(true, |date| transaction.date >= date))
        .take(limit.unwrap_or(usize::MAX))
        .map(|(position, transaction)| row(position, transaction))
        .collect();

    if rows.is_empty() {
        output::info("No transactions found.");
        return Ok(());
    }
    output::info("Here are your transactions:");
    for line in rows {
        output::info(line);
    }
    Ok(())
}

fn cmd_view(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = args.first().map(|raw| raw.to_lowercase());
    let want_income = match kind.as_deref() {
        Some("income") => true,
        Some("expense") => false,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: view income|expense".into(),
            ))
        }
    };

    let rows: Vec<String> = context
        .ledger
        .list_indexed()
        .into_iter()
        .filter(|(_, transaction)| transaction.is_income() == want_income)
        .map(|(position, transaction)| row(position, transaction))
        .collect();
    let (label, total) = if want_income {
        ("income", context.ledger.total_income())
    } else {
        ("expenses", context.ledger.total_expenses())
    };

    if rows.is_empty() {
        output::info(format!("No {label} recorded."));
        return Ok(());
    }
    for line in rows {
        output::info(line);
    }
    output::info(format!("Total {label}: {}", context.config.money(total)));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: delete INDEX | START-END".into()))?;
    let removed = match parse_positions(raw)? {
        Positions::Single(position) => vec![context.ledger.delete(position)?],
        Positions::Range(start, end) => context.ledger.delete_range(start, end)?,
    };
    context.persist()?;
    output::success(format!("Deleted {} transaction(s):", removed.len()));
    for transaction in &removed {
        output::info(format!("  {transaction}"));
    }
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ArgMap::parse(args, EDIT_PREFIXES);
    let position = parsed
        .positional()
        .first()
        .and_then(|raw| raw.parse::<usize>().ok())
        .ok_or_else(|| CommandError::InvalidArguments("usage: edit INDEX [fields...]".into()))?;

    let patch = TransactionPatch {
        amount: parsed.get("a").map(parse_amount).transpose()?,
        description: parsed.get("d").map(str::to_string),
        date: parsed.get("date").map(parse_date).transpose()?,
        category: parsed.has("c").then(|| Category::normalize(parsed.get("c"))),
        tags: parsed.has("t").then(|| parsed.all("t")),
    };
    let max_tags = context.config.max_tags;
    let updated = TransactionService::amend(&mut context.ledger, position, patch, max_tags)?;
    context.persist()?;
    output::success(format!("Transaction {position} updated: {updated}"));
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let keyword = args.join(" ");
    if keyword.trim().is_empty() {
        return Err(CommandError::InvalidArguments("usage: search KEYWORD".into()));
    }
    let hits = context.ledger.search(keyword.trim());
    if hits.is_empty() {
        output::info(format!("No transactions match \"{}\".", keyword.trim()));
        return Ok(());
    }
    output::info(format!("Found {} matching transaction(s):", hits.len()));
    for (offset, transaction) in hits.iter().enumerate() {
        output::info(format!("{}. {transaction} ({})", offset + 1, transaction.date));
    }
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ArgMap::parse(args, &["s", "e"]);
    let start = parse_date(parsed.require("s", "start date")?)?;
    let end = match parsed.get("e") {
        Some(raw) => parse_date(raw)?,
        None => today(),
    };
    if start > end {
        return Err(CommandError::InvalidArguments(
            "start date must not be after end date".into(),
        ));
    }

    let mut hits = context.ledger.filter(start, end);
    hits.sort_by(|a, b| b.date.cmp(&a.date));
    if hits.is_empty() {
        output::info(format!("No transactions between {start} and {end}."));
        return Ok(());
    }
    output::info(format!("Transactions from {start} to {end}:"));
    for (offset, transaction) in hits.iter().enumerate() {
        output::info(format!("{}. {transaction} ({})", offset + 1, transaction.date));
    }
    Ok(())
}

fn cmd_balance(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = &context.ledger;
    let config = &context.config;
    output::info(format!("Current Balance: {}", config.money(ledger.balance())));
    output::info(format!("Total Income: {}", config.money(ledger.total_income())));
    output::info(format!(
        "Total Expenses: {}",
        config.money(ledger.total_expenses())
    ));
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let confirmed = matches!(args.first(), Some(word) if word.eq_ignore_ascii_case("confirm"))
        || context.confirm("Clear all data? This action cannot be undone.")?;
    if !confirmed {
        context.awaiting_clear = true;
        output::warning(
            "Are you sure you want to clear all data? This action cannot be undone.\n\
             Type 'clear confirm' to proceed, or simply type 'y' to confirm, 'n' to cancel.",
        );
        return Ok(());
    }
    clear_all(context)
}

/// Answers an outstanding `clear` question with a bare `y` or `n`.
/// Returns `None` when `line` is not such an answer; the question is
/// dropped either way.
pub(crate) fn answer_pending_clear(
    context: &mut ShellContext,
    line: &str,
) -> Option<CommandResult> {
    if !std::mem::take(&mut context.awaiting_clear) {
        return None;
    }
    match line.trim().to_ascii_lowercase().as_str() {
        "y" => Some(clear_all(context)),
        "n" => {
            output::info("Clear cancelled.");
            Some(Ok(()))
        }
        _ => None,
    }
}

fn clear_all(context: &mut ShellContext) -> CommandResult {
    context.ledger.clear();
    context.ledger.targets_mut().clear();
    context.persist()?;
    output::success("All data has been cleared.");
    Ok(())
}

fn row(position: usize, transaction: &Transaction) -> String {
    format!("{position}. {transaction} ({})", transaction.date)
}
