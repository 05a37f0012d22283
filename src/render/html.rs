//! HTML invoice document.
//!
//! Produces a single self-contained page with embedded CSS, suitable for
//! printing to PDF from a browser.

use super::{
    line_rows, present, shows_gst_column, totals_lines, GST_FOOTER, PAYMENT_TERMS,
};
use crate::core::Invoice;

const CSS: &str = r#"
body { font-family: Helvetica, Arial, sans-serif; color: #222; max-width: 800px; margin: 2em auto; }
h1 { font-size: 2em; margin-bottom: 0.2em; }
.meta, .parties { display: flex; justify-content: space-between; margin-bottom: 1.5em; }
.party { width: 48%; }
table { width: 100%; border-collapse: collapse; margin-bottom: 1em; }
th { background: #f0f0f0; text-align: left; }
th, td { padding: 6px 8px; border-bottom: 1px solid #ddd; }
td.num, th.num { text-align: right; }
.gst-free { color: #666; font-size: 0.9em; }
.totals { margin-left: auto; width: 40%; }
.totals div { display: flex; justify-content: space-between; padding: 2px 0; }
.totals .grand { font-weight: bold; border-top: 1px solid #222; }
footer { margin-top: 2em; font-size: 0.85em; color: #555; }
"#;

pub fn render_html(invoice: &Invoice) -> String {
    let title = invoice.title();
    format!(
        r##"<!DOCTYPE html>
<html lang="en-AU">
<head>
    <meta charset="UTF-8">
    <title>{title} {number}</title>
    <style>{CSS}</style>
</head>
<body>
    <h1>{title}</h1>
    <div class="meta">
{meta}
    </div>
    <div class="parties">
{business}
{client}
    </div>
{items}
    <div class="totals">
{totals}
    </div>
{notes}{payment}
    <footer>
{footer}
    </footer>
</body>
</html>
"##,
        number = escape(&invoice.number),
        meta = meta_section(invoice),
        business = business_section(invoice),
        client = client_section(invoice),
        items = items_section(invoice),
        totals = totals_section(invoice),
        notes = notes_section(invoice),
        payment = payment_section(invoice),
        footer = footer_section(invoice),
    )
}

fn meta_section(invoice: &Invoice) -> String {
    let mut rows = vec![format!(
        "        <div><strong>Invoice #:</strong> {}</div>",
        escape(&invoice.number)
    )];
    if let Some(date) = invoice.date {
        rows.push(format!("        <div><strong>Date:</strong> {}</div>", date.format("%Y-%m-%d")));
    }
    if let Some(due) = invoice.due_date {
        rows.push(format!("        <div><strong>Due Date:</strong> {}</div>", due.format("%Y-%m-%d")));
    }
    rows.join("\n")
}

fn business_section(invoice: &Invoice) -> String {
    let business = &invoice.business;
    let address = &business.address;
    let mut lines = vec![
        format!("<div><strong>{}</strong></div>", escape(&business.name)),
        format!("<div>ABN: {}</div>", escape(&business.abn)),
        format!("<div>{}</div>", escape(&address.street)),
        format!(
            "<div>{}, {} {}</div>",
            escape(&address.city),
            escape(&address.state),
            escape(&address.postcode)
        ),
    ];
    if let Some(phone) = present(&business.phone) {
        lines.push(format!("<div>Phone: {}</div>", escape(phone)));
    }
    if let Some(email) = present(&business.email) {
        lines.push(format!("<div>Email: {}</div>", escape(email)));
    }
    party("From:", lines)
}

fn client_section(invoice: &Invoice) -> String {
    let client = &invoice.client;
    let mut lines = vec![
        format!("<div><strong>{}</strong></div>", escape(&client.name)),
        format!("<div>{}</div>", escape(&client.address.street).replace('\n', "<br>")),
    ];
    let locality = client.address.locality();
    if !locality.is_empty() {
        lines.push(format!("<div>{}</div>", escape(&locality)));
    }
    if let Some(email) = present(&client.email) {
        lines.push(format!("<div>Email: {}</div>", escape(email)));
    }
    if let Some(phone) = present(&client.phone) {
        lines.push(format!("<div>Phone: {}</div>", escape(phone)));
    }
    party("Bill To:", lines)
}

fn party(heading: &str, lines: Vec<String>) -> String {
    format!(
        "        <div class=\"party\">\n            <h3>{heading}</h3>\n            {}\n        </div>",
        lines.join("\n            ")
    )
}

fn items_section(invoice: &Invoice) -> String {
    let with_gst = shows_gst_column(invoice);
    let mut html = String::from("    <table>\n        <thead><tr><th>Description</th><th class=\"num\">Qty</th><th class=\"num\">Unit Price</th>");
    if with_gst {
        html.push_str("<th class=\"num\">GST</th>");
    }
    html.push_str("<th class=\"num\">Total</th></tr></thead>\n        <tbody>\n");

    for (item, row) in invoice.items.iter().zip(line_rows(invoice)) {
        let label = if item.is_gst_free {
            " <span class=\"gst-free\">(GST-Free)</span>"
        } else {
            ""
        };
        html.push_str(&format!(
            "            <tr><td>{}{label}</td><td class=\"num\">{}</td><td class=\"num\">{}</td>",
            escape(&item.description),
            row.quantity,
            row.unit_price
        ));
        if with_gst {
            html.push_str(&format!("<td class=\"num\">{}</td>", row.gst));
        }
        html.push_str(&format!("<td class=\"num\">{}</td></tr>\n", row.total));
    }
    html.push_str("        </tbody>\n    </table>");
    html
}

fn totals_section(invoice: &Invoice) -> String {
    let lines = totals_lines(invoice);
    let last = lines.len().saturating_sub(1);
    lines
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let class = if i == last { " class=\"grand\"" } else { "" };
            format!("        <div{class}><span>{label}</span><span>{value}</span></div>")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn notes_section(invoice: &Invoice) -> String {
    match &invoice.notes {
        Some(notes) => format!(
            "    <section class=\"notes\">\n        <h4>Notes:</h4>\n        <p>{}</p>\n    </section>\n",
            escape(notes)
        ),
        None => String::new(),
    }
}

fn payment_section(invoice: &Invoice) -> String {
    match invoice.business.bank_account.as_ref().filter(|b| b.is_complete()) {
        Some(bank) => format!(
            "    <section class=\"payment\">\n        <h4>Payment Details:</h4>\n        <div>Account Name: {}</div>\n        <div>BSB: {}</div>\n        <div>Account Number: {}</div>\n    </section>\n",
            escape(&bank.account_name),
            escape(&bank.bsb),
            escape(&bank.account_number)
        ),
        None => String::new(),
    }
}

fn footer_section(invoice: &Invoice) -> String {
    let mut lines = Vec::new();
    if invoice.business.is_gst_registered {
        lines.push(format!("        <p>{GST_FOOTER}</p>"));
    }
    lines.push(format!("        <p>{PAYMENT_TERMS}</p>"));
    lines.join("\n")
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
