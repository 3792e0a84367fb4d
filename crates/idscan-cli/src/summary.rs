use console::Style;
use idscan_core::payload::IdentityRecord;
use idscan_core::scan::{AutofillForm, AutofillStatus, ScanOutcome, ScanSource};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    ok: Style,
    warn: Style,
    empty: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            empty: Style::new().dim().yellow(),
        }
    }
}

pub fn print_scan_summary(outcome: &ScanOutcome, form: &AutofillForm, status: AutofillStatus) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("ID Card Scan"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(12)));
    println!();

    let status_style = match status {
        AutofillStatus::Filled => &s.ok,
        AutofillStatus::NotFound | AutofillStatus::Unreadable => &s.warn,
    };
    println!("  {}", status_style.apply_to(status.message()));
    println!();

    match outcome {
        ScanOutcome::Parsed { raw, source, .. } => {
            let from = match source {
                ScanSource::Region => "scan box",
                ScanSource::FullImage => "whole edited image",
            };
            println!("  {:<14}{}", s.label.apply_to("Read from"), s.value.apply_to(from));
            println!("  {:<14}{}", s.label.apply_to("Payload"), raw);
        }
        ScanOutcome::Unparseable { raw, error } => {
            println!("  {:<14}{}", s.label.apply_to("Payload"), raw);
            println!("  {:<14}{}", s.label.apply_to("Problem"), s.warn.apply_to(error));
        }
        ScanOutcome::NotFound => {}
    }
    println!();

    let sex = form.sex.to_string();
    let fields = [
        ("ID number", form.id_number.as_str()),
        ("Full name", form.full_name.as_str()),
        ("Birth date", form.birth_date.as_str()),
        ("Sex", sex.as_str()),
        ("Address", form.address.as_str()),
    ];
    for (label, value) in fields {
        print_field(&s, label, value);
    }
    println!();
}

pub fn print_record(record: &IdentityRecord) {
    let s = Styles::new();
    let sex = record.sex.to_string();
    let birth = record.birth_date_iso();

    println!();
    print_field(&s, "ID number", &record.id_number);
    print_field(&s, "Full name", &record.full_name);
    print_field(&s, "Birth date", &birth);
    print_field(&s, "Sex", &sex);
    print_field(&s, "Address", &record.address);
    println!();
}

fn print_field(s: &Styles, label: &str, value: &str) {
    if value.is_empty() {
        println!("  {:<14}{}", s.label.apply_to(label), s.empty.apply_to("(empty)"));
    } else {
        println!("  {:<14}{}", s.label.apply_to(label), s.value.apply_to(value));
    }
}
