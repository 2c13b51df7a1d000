use docket::{Alignment, FieldDefinition, Section, Template, TemplateKind};
use serde_json::{Value, json};

pub fn field(label: &str, mapping: &str, default: &str, align: Alignment) -> FieldDefinition {
    FieldDefinition::new(label, mapping, default, align)
}

/// The payslip template as stored by the editor, in its JSON form
pub fn payslip_json() -> Value {
    json!({
        "id": "payslip-1",
        "name": "Payslip",
        "type": "salary",
        "headerFields": [],
        "bodyFields": [
            { "id": "f1", "keyLabel": "Name", "mapping": "user.name", "defaultValue": "-", "align": "left" },
            { "id": "f2", "keyLabel": "Total", "mapping": "user.payDetail.total_salary_amount", "defaultValue": "0", "align": "right" }
        ],
        "footerFields": []
    })
}

pub fn payslip() -> Template {
    serde_json::from_value(payslip_json()).expect("payslip fixture is valid")
}

pub fn alice() -> Value {
    json!({
        "user": {
            "name": "Alice Johnson",
            "payDetail": { "total_salary_amount": 75000 }
        }
    })
}

/// A bill with fields in every group and every alignment
pub fn invoice() -> Template {
    Template::new("Invoice", TemplateKind::Bill)
        .with_field(Section::Header, field("Invoice No", "bill.number", "N/A", Alignment::Left))
        .with_field(Section::Body, field("Customer", "customer.name", "-", Alignment::Left))
        .with_field(Section::Body, field("Amount", "bill.totalAmount", "0", Alignment::Right))
        .with_field(Section::Footer, field("Status", "bill.status", "unpaid", Alignment::Center))
}

pub fn invoice_data() -> Value {
    json!({
        "customer": { "name": "ACME Corp" },
        "bill": { "number": "INV-042", "totalAmount": 65000, "status": null }
    })
}

/// A generic template with `count` body fields labelled `Row 1`, `Row 2`, ...
/// each showing its own number as the default value
pub fn rows_template(count: usize) -> Template {
    (1..=count).fold(Template::new("Rows", TemplateKind::Generic), |t, i| {
        t.with_field(
            Section::Body,
            field(&format!("Row {}", i), "absent", &i.to_string(), Alignment::Left),
        )
    })
}
