use docket_template::{Alignment, FieldDefinition, Section, Template, TemplateKind};
use serde_json::{Value, json};

pub fn field(label: &str, mapping: &str, default: &str, align: Alignment) -> FieldDefinition {
    FieldDefinition::new(label, mapping, default, align)
}

/// The two-line payslip used throughout the tests.
pub fn payslip_template() -> Template {
    Template::new("Payslip", TemplateKind::Salary)
        .with_field(Section::Body, field("Name", "user.name", "-", Alignment::Left))
        .with_field(
            Section::Body,
            field("Total", "user.payDetail.total_salary_amount", "0", Alignment::Right),
        )
}

pub fn alice() -> Value {
    json!({
        "user": {
            "name": "Alice Johnson",
            "payDetail": { "total_salary_amount": 75000 }
        }
    })
}

/// A generic template with `count` body fields labelled `F1`, `F2`, ...
pub fn numbered_template(count: usize) -> Template {
    (1..=count).fold(Template::new("Numbered", TemplateKind::Generic), |t, i| {
        t.with_field(
            Section::Body,
            field(&format!("F{}", i), "missing", &i.to_string(), Alignment::Left),
        )
    })
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
