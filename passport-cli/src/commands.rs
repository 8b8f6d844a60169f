use std::path::{Path, PathBuf};
use std::sync::Arc;

use eyre::{eyre, WrapErr};
use passport_core::credentials::{CredentialEntry, CredentialList, CredentialStore, EntityId};
use passport_core::dispatch::{encode_index, Call, Dispatcher, Outcome};
use passport_core::platform::FileBoxStore;
use passport_core::vid::generate_vid;
use serde_json::{json, Value};

use super::{Cli, Command};

/// Executes the parsed command against the boxes in `data_dir` and returns
/// the text to print.
pub fn run(cli: &Cli, data_dir: &Path) -> eyre::Result<String> {
    let open_store = || -> eyre::Result<CredentialStore> {
        let boxes = FileBoxStore::new(data_dir)
            .wrap_err_with(|| format!("cannot open box store at {}", data_dir.display()))?
            .with_max_box_size(cli.max_box_size);
        Ok(CredentialStore::new(Arc::new(boxes)))
    };

    match &cli.command {
        Command::Add { asset, entry, file } => {
            let store = open_store()?;
            let asset = EntityId::new(*asset);
            store.add(asset, &load_entry(entry.as_deref(), file.as_ref())?)?;
            // The append is committed; an undecodable older record only
            // costs us the count.
            let record_bytes = store.read_raw(asset)?.as_ref().map_or(0, Vec::len);
            let count = store.read(asset).ok().as_ref().map(CredentialList::len);
            tracing::info!(%asset, ?count, record_bytes, "credential added");
            let text = count.map_or_else(
                || format!("credential appended to asset {asset}; existing record is not decodable"),
                |count| format!("asset {asset} now holds {count} credential(s)"),
            );
            Ok(render(
                cli.json,
                &json!({ "asset": asset.get(), "count": count, "recordBytes": record_bytes }),
                text,
            ))
        }
        Command::View { asset } => {
            let asset = EntityId::new(*asset);
            open_store()?.view(asset)?;
            Ok(render(
                cli.json,
                &json!({ "asset": asset.get(), "exists": true }),
                format!("asset {asset} has a credential box"),
            ))
        }
        Command::List { asset } => {
            let list = open_store()?.read(EntityId::new(*asset))?;
            Ok(render_list(cli.json, &list))
        }
        Command::Modify {
            asset,
            index,
            entry,
            file,
        } => {
            let asset = EntityId::new(*asset);
            let entry = load_entry(entry.as_deref(), file.as_ref())?;
            open_store()?.modify(asset, *index, entry)?;
            Ok(render(
                cli.json,
                &json!({ "asset": asset.get(), "modified": index }),
                format!("replaced credential {index} of asset {asset}"),
            ))
        }
        Command::Delete { asset, index } => {
            let store = open_store()?;
            let asset = EntityId::new(*asset);
            store.delete(asset, *index)?;
            let count = store.read(asset)?.len();
            Ok(render(
                cli.json,
                &json!({ "asset": asset.get(), "deleted": index, "count": count }),
                format!("deleted credential {index} of asset {asset}, {count} left"),
            ))
        }
        Command::Call {
            operation,
            asset,
            args,
        } => {
            let mut call = Call::new(operation.as_str(), EntityId::new(*asset));
            for arg in args {
                call = call.arg(parse_call_arg(arg)?);
            }
            Ok(render_outcome(
                cli.json,
                Dispatcher::new(open_store()?).dispatch(&call),
            ))
        }
        Command::Key { asset } => {
            let key = passport_core::credentials::derive_key(EntityId::new(*asset));
            Ok(render(
                cli.json,
                &json!({ "asset": asset, "key": key.to_hex() }),
                key.to_hex(),
            ))
        }
        Command::Vid {
            name,
            dob,
            passport,
        } => {
            let vid = generate_vid(name, dob, passport);
            Ok(render(cli.json, &json!({ "vid": vid }), vid.clone()))
        }
    }
}

fn render(as_json: bool, value: &Value, text: String) -> String {
    if as_json {
        value.to_string()
    } else {
        text
    }
}

fn render_outcome(as_json: bool, outcome: Outcome) -> String {
    match outcome {
        Outcome::Approve => render(as_json, &json!({ "outcome": "approve" }), "approve".to_string()),
        Outcome::Reject(reason) => render(
            as_json,
            &json!({ "outcome": "reject", "reason": reason.to_string() }),
            format!("reject: {reason}"),
        ),
    }
}

/// JSON entries are embedded as values, anything else as a lossy string.
fn render_list(as_json: bool, list: &CredentialList) -> String {
    if as_json {
        let values: Vec<Value> = list
            .iter()
            .map(|entry| {
                serde_json::from_slice(entry.as_bytes()).unwrap_or_else(|_| {
                    Value::String(String::from_utf8_lossy(entry.as_bytes()).into_owned())
                })
            })
            .collect();
        return Value::Array(values).to_string();
    }

    list.iter()
        .enumerate()
        .map(|(index, entry)| format!("{index}: {}", String::from_utf8_lossy(entry.as_bytes())))
        .collect::<Vec<_>>()
        .join("\n")
}

fn load_entry(entry: Option<&str>, file: Option<&PathBuf>) -> eyre::Result<CredentialEntry> {
    match (entry, file) {
        (Some(text), None) => Ok(CredentialEntry::from(text)),
        (None, Some(path)) => std::fs::read(path)
            .map(CredentialEntry::from)
            .wrap_err_with(|| format!("cannot read {}", path.display())),
        _ => Err(eyre!("pass either an entry or --file")),
    }
}

fn parse_call_arg(arg: &str) -> eyre::Result<Vec<u8>> {
    if let Some(number) = arg.strip_prefix("u64:") {
        let index: u64 = number
            .parse()
            .wrap_err_with(|| format!("invalid integer argument {arg:?}"))?;
        return Ok(encode_index(index));
    }
    if let Some(digits) = arg.strip_prefix("hex:") {
        return hex::decode(digits).wrap_err_with(|| format!("invalid hex argument {arg:?}"));
    }
    Ok(arg.as_bytes().to_vec())
}
