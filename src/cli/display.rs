use crate::models::{Business, TaskWithRelations};

/// First segment of a UUID, enough to paste into `show`/`edit`.
pub fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let text: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", text.trim_end())
    } else {
        s.to_string()
    }
}

pub fn print_business_table(businesses: &[Business]) {
    if businesses.is_empty() {
        println!("No matches.");
        return;
    }

    println!(
        "{:<10} {:<30} {:<12} {:<28} {}",
        "ID", "NAME", "ORG.NR", "EMAIL", "LOCATION"
    );
    for b in businesses {
        println!(
            "{:<10} {:<30} {:<12} {:<28} {}",
            short_id(&b.id),
            truncate(&b.name, 28),
            b.org_number.as_deref().unwrap_or("-"),
            truncate(b.email.as_deref().unwrap_or("-"), 26),
            b.postal_location().unwrap_or_else(|| "-".to_string()),
        );
    }
    println!("\n{} total", businesses.len());
}

/// Print a full business detail with clean formatting (only non-empty fields)
pub fn print_business_detail(business: &Business) {
    println!("{}\n", business.name);

    println!("  {} · {}", business.stage.as_str(), business.status.as_str());

    if let Some(ref org_number) = business.org_number {
        let form = business
            .org_form
            .as_ref()
            .map(|f| format!(" ({})", f))
            .unwrap_or_default();
        println!("  Org.nr {}{}", org_number, form);
    }

    if let Some(ref description) = business.industry_description {
        let code = business
            .industry_code
            .as_ref()
            .map(|c| format!(" [{}]", c))
            .unwrap_or_default();
        println!("  {}{}", description, code);
    }

    if let Some(ref contact) = business.contact_person {
        println!("  {}", contact);
    }
    if let Some(ref email) = business.email {
        println!("  {}", email);
    }
    if let Some(ref phone) = business.phone {
        println!("  {}", phone);
    }

    if let Some(ref street) = business.street_address {
        println!("  {}", street);
    }
    if let Some(location) = business.postal_location() {
        println!("  {}", location);
    }

    println!("\n  id {}", business.id);
}

pub fn print_task_table(tasks: &[TaskWithRelations]) {
    if tasks.is_empty() {
        println!("No matches.");
        return;
    }

    println!(
        "{:<10} {:<32} {:<24} {}",
        "ID", "TITLE", "BUSINESS", "ASSIGNEES"
    );
    for t in tasks {
        let assignees = if t.assignees.is_empty() {
            "-".to_string()
        } else {
            t.assignees
                .iter()
                .map(|u| u.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "{:<10} {:<32} {:<24} {}",
            short_id(&t.task.id),
            truncate(&t.task.title, 30),
            truncate(
                t.business.as_ref().map(|b| b.name.as_str()).unwrap_or("-"),
                22
            ),
            assignees,
        );
    }
    println!("\n{} total", tasks.len());
}
