use std::{env, error::Error, process::ExitCode};

use qrpayload::{decode, encode, Birthday, Contact, Record, RecordKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: qrpayload decode <payload>
       qrpayload encode <kind> [field]...
       qrpayload kinds";

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = env::args().skip(1).collect::<Vec<_>>();
    match run(&args) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            warn!(error = %err, "qrpayload_failure");
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<String, Box<dyn Error>> {
    match args.first().map(String::as_str) {
        Some("decode") => {
            let raw = args.get(1).ok_or("missing payload")?;
            let record = decode(raw)?;
            info!(kind = record.kind().key(), len = raw.len(), "decoded");

            let mut out = record.to_string();
            if let Some(link) = record.action_link() {
                out.push_str(&format!("\n\nOpen: {link}"));
            }
            Ok(out)
        }
        Some("encode") => {
            let kind = args.get(1).ok_or("missing kind")?.parse::<RecordKind>()?;
            let record = record_from_fields(kind, &args[2..])?;
            let payload = encode(&record);
            info!(kind = kind.key(), len = payload.len(), "encoded");
            Ok(payload)
        }
        Some("kinds") => Ok(RecordKind::ALL
            .iter()
            .map(|k| format!("{:<14}{}", k.key(), k.label()))
            .collect::<Vec<_>>()
            .join("\n")),
        _ => Err("unknown command".into()),
    }
}

// Fields are positional, in the order the record declares them
fn record_from_fields(kind: RecordKind, fields: &[String]) -> Result<Record, Box<dyn Error>> {
    let field = |i: usize| fields.get(i).cloned().unwrap_or_default();
    let optional = |i: usize| fields.get(i).filter(|f| !f.is_empty()).cloned();

    let record = match kind {
        RecordKind::Text => Record::text(field(0)),
        RecordKind::Url => Record::url(field(0)),
        RecordKind::Bookmark => Record::bookmark(field(0), field(1)),
        RecordKind::Email => Record::email(field(0)),
        RecordKind::EmailMessage => Record::email_message(field(0), field(1), field(2)),
        RecordKind::Telephone => Record::telephone(field(0)),
        RecordKind::Phonebook => {
            let birthday = optional(4).map(|b| Birthday::parse(&b)).transpose()?;
            Record::Phonebook(Contact {
                name: optional(0),
                telephone: optional(1),
                email: optional(2),
                note: optional(3),
                birthday,
                address: optional(5),
                url: optional(6),
            })
        }
        RecordKind::Sms => Record::sms(field(0), field(1)),
        RecordKind::Mms => Record::mms(field(0), field(1)),
        RecordKind::Geo => Record::geo(field(0), field(1)),
    };

    Ok(record)
}
