use cadence_core::date::parse_date;
use cadence_core::models::Task;
use cadence_core::rule::{DaySelector, RecurrenceRule};
use chrono::NaiveDate;
use chrono_humanize::HumanTime;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use owo_colors::OwoColorize;

const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn display_tasks(tasks: &[Task], today: NaiveDate) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Title", "Repeat", "Comment"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id));
        row.add_cell(date_cell(&task.date, today));

        let title = if task.is_recurring() {
            format!("↻ {}", task.title)
        } else {
            task.title.clone()
        };
        row.add_cell(Cell::new(title).add_attribute(Attribute::Bold));
        row.add_cell(Cell::new(describe_repeat(&task.repeat)));
        row.add_cell(Cell::new(&task.comment).fg(Color::DarkGrey));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_task_details(task: &Task, today: NaiveDate) {
    println!("{} {}", "Task".bold(), task.id.to_string().yellow());
    println!("  Title:   {}", task.title.bright_white().bold());
    println!("  Date:    {} ({})", task.date.cyan(), relative_day(&task.date, today));
    println!("  Repeat:  {}", describe_repeat(&task.repeat));
    if !task.comment.is_empty() {
        println!("  Comment: {}", task.comment);
    }
}

fn date_cell(date: &str, today: NaiveDate) -> Cell {
    let text = format!("{} ({})", date, relative_day(date, today));
    match parse_date(date) {
        Ok(day) if day < today => Cell::new(text).fg(Color::Red),
        Ok(day) if day == today => Cell::new(text).fg(Color::Yellow),
        _ => Cell::new(text),
    }
}

/// "today", or a rough distance such as "in 5 days" / "2 weeks ago".
pub fn relative_day(date: &str, today: NaiveDate) -> String {
    match parse_date(date) {
        Ok(day) if day == today => "today".to_string(),
        Ok(day) => HumanTime::from(day - today).to_string(),
        Err(_) => "invalid date".to_string(),
    }
}

/// Human reading of a stored repeat string. Strings that no longer parse are
/// shown as they are.
pub fn describe_repeat(repeat: &str) -> String {
    if repeat.is_empty() {
        return "once".to_string();
    }
    let rule = match RecurrenceRule::parse(repeat) {
        Ok(rule) => rule,
        Err(_) => return repeat.to_string(),
    };

    match rule {
        RecurrenceRule::Daily { interval: 1 } => "every day".to_string(),
        RecurrenceRule::Daily { interval } => format!("every {} days", interval),
        RecurrenceRule::Yearly => "every year".to_string(),
        RecurrenceRule::Weekly { weekdays } => {
            let names: Vec<&str> = weekdays
                .iter()
                .filter_map(|d| WEEKDAY_NAMES.get(usize::from(*d).wrapping_sub(1)).copied())
                .collect();
            format!("weekly on {}", names.join(", "))
        }
        RecurrenceRule::Monthly { days, months } => {
            let days: Vec<String> = days.iter().map(|d| describe_day(*d)).collect();
            let mut text = format!("monthly on {}", days.join(", "));
            if !months.is_empty() {
                let names: Vec<&str> = months
                    .iter()
                    .filter_map(|m| MONTH_NAMES.get(usize::from(*m).wrapping_sub(1)).copied())
                    .collect();
                text.push_str(&format!(" in {}", names.join(", ")));
            }
            text
        }
    }
}

fn describe_day(day: DaySelector) -> String {
    match day {
        DaySelector::Last => "last day".to_string(),
        DaySelector::SecondToLast => "second-to-last day".to_string(),
        DaySelector::Day(n) => format!("the {}", ordinal(n)),
    }
}

fn ordinal(n: u8) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
