//! Walks a contact form through a failed and a successful submission.
//!
//! Run with `cargo run -p forms --example contact_form`. The schema lives in
//! `assets/contact.ron`; outcomes are reported by the default `TracingSink`.

use forms::{FormController, FormView, SchemaFormat, SubmitOutcome, parse_schema};
use tracing::level_filters::LevelFilter;

const CONTACT_SCHEMA: &str = include_str!("../assets/contact.ron");

fn main() -> anyhow::Result<()> {
    forms::logging::init(LevelFilter::DEBUG);

    let schema = parse_schema(CONTACT_SCHEMA, SchemaFormat::Ron)?;
    let mut form = FormController::new(schema)?;

    // First attempt: half-filled form
    form.handle_change("name", "Jane Doe")?;
    form.handle_change("email", "jane.example.com")?;
    form.handle_change("age", "seventeen")?;
    form.handle_submit();
    print_form(&form.view());

    // Second attempt: fix the reported fields, pick a contact option
    form.handle_change("email", "jane@example.com")?;
    form.handle_change("age", "34")?;
    form.select_option("contact", 1, 0)?;
    if let SubmitOutcome::Accepted(submission) = form.handle_submit() {
        let json = submission.to_json(form.schema());
        println!("{}", serde_json::to_string_pretty(&json)?);
    }
    print_form(&form.view());

    Ok(())
}

fn print_form(view: &FormView<'_>) {
    println!("== {}", view.form_name);
    for field in &view.fields {
        let marker = if field.required { "*" } else { "" };
        if field.groups.is_empty() {
            println!("{}{marker} [{}]: {:?}", field.label, field.input_type, field.value);
        } else {
            println!("{}{marker}:", field.label);
            for group in &field.groups {
                let options: Vec<String> = group
                    .options
                    .iter()
                    .map(|o| format!("({}) {}", if o.checked { "x" } else { " " }, o.label))
                    .collect();
                let separator = match group.layout {
                    forms::GroupLayout::Inline => "  ",
                    forms::GroupLayout::Stacked => "\n  ",
                };
                println!("  {}", options.join(separator));
            }
        }
        if let Some(error) = field.error {
            println!("  ! {error}");
        }
    }
}
