use dioxus::prelude::*;

use crate::core::model::{AppState, DEFAULT_PARTS};
use crate::state::use_store;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(&'static str),
    Done(String),
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum ExportKind {
    Json,
    Csv,
}

#[component]
pub fn ExportPanel() -> Element {
    let store = use_store();
    let snapshot = store.state().read().clone();
    let total = snapshot.entries.len();

    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(label) => Some(("panel__meta".to_string(), format!("{label}…"))),
        ExportStatus::Done(message) => Some((
            "panel__meta panel__meta--success".to_string(),
            message.clone(),
        )),
        ExportStatus::Error(err) => Some((
            "panel__meta panel__meta--error".to_string(),
            format!("Export failed: {err}"),
        )),
    };

    let json_handler = {
        let snapshot = snapshot.clone();
        move |_| run_export(ExportKind::Json, snapshot.clone(), status, busy)
    };
    let csv_handler = {
        let snapshot = snapshot.clone();
        move |_| run_export(ExportKind::Csv, snapshot.clone(), status, busy)
    };

    rsx! {
        section { class: "panel export",
            div { class: "panel__header",
                div { class: "panel__titles",
                    h2 { class: "panel__title", "Data Egress" }
                    span { class: "panel__subtitle", "JSON + CSV EXPORT" }
                }
            }
            if total == 0 {
                p { class: "panel__placeholder", "Exports unlock once entries are recorded." }
            } else {
                p { class: "panel__meta", "{total} entries and {snapshot.goals.len()} goals ready for export." }
                div { class: "export__actions",
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        disabled: busy(),
                        onclick: json_handler,
                        "Export JSON"
                    }
                    button {
                        r#type: "button",
                        class: "button",
                        disabled: busy(),
                        onclick: csv_handler,
                        "Export CSV"
                    }
                }
                if let Some((class_name, message)) = feedback {
                    p { class: "{class_name}", "{message}" }
                }
            }
        }
    }
}

fn run_export(
    kind: ExportKind,
    state: AppState,
    mut status: Signal<ExportStatus>,
    mut busy: Signal<bool>,
) {
    if busy() {
        return;
    }
    busy.set(true);
    status.set(ExportStatus::Working(match kind {
        ExportKind::Json => "Preparing JSON",
        ExportKind::Csv => "Preparing CSV",
    }));

    let job = async move {
        match kind {
            ExportKind::Json => perform_json_export(state).await,
            ExportKind::Csv => perform_csv_export(state).await,
        }
    };

    #[cfg(target_arch = "wasm32")]
    {
        spawn(async move {
            finish(job.await, status, busy);
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        finish(futures::executor::block_on(job), status, busy);
    }
}

fn finish(
    outcome: Result<String, String>,
    mut status: Signal<ExportStatus>,
    mut busy: Signal<bool>,
) {
    match outcome {
        Ok(message) => status.set(ExportStatus::Done(message)),
        Err(err) => {
            tracing::warn!(error = %err, "export failed");
            status.set(ExportStatus::Error(err));
        }
    }
    busy.set(false);
}

async fn perform_json_export(state: AppState) -> Result<String, String> {
    let json = serde_json::to_string_pretty(&state).map_err(|err| err.to_string())?;
    let copied = copy_to_clipboard(json.clone()).await;
    if let Err(err) = &copied {
        tracing::debug!(error = %err, "clipboard copy skipped");
    }
    let filename = format!("bodymetrics-{}.json", timestamp_slug());
    let delivery = download_bytes(&filename, "application/json", json.into_bytes()).await?;
    let prefix = if copied.is_ok() {
        "JSON copied and "
    } else {
        "JSON "
    };
    Ok(match delivery {
        Some(path) => format!("{prefix}saved to {path}"),
        None => format!("{prefix}download started"),
    })
}

async fn perform_csv_export(state: AppState) -> Result<String, String> {
    let csv = build_csv(&state);
    let filename = format!("bodymetrics-{}.csv", timestamp_slug());
    let delivery = download_bytes(&filename, "text/csv", csv.into_bytes()).await?;
    Ok(match delivery {
        Some(path) => format!("CSV saved to {path}"),
        None => "CSV download started".to_string(),
    })
}

/// `date,<parts...>` with one row per entry in stored order. Missing values
/// are left empty.
pub fn build_csv(state: &AppState) -> String {
    let mut csv = String::new();
    let header = std::iter::once("date")
        .chain(DEFAULT_PARTS.iter().map(|part| part.label()))
        .map(escape_csv)
        .collect::<Vec<_>>()
        .join(",");
    csv.push_str(&header);
    csv.push('\n');

    for entry in &state.entries {
        let line = std::iter::once(escape_csv(&entry.date))
            .chain(DEFAULT_PARTS.iter().map(|&part| {
                entry
                    .value(part)
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            }))
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }

    csv
}

fn escape_csv(value: &str) -> String {
    let needs_quotes = value.contains(',') || value.contains('"') || value.contains('\n');
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

async fn copy_to_clipboard(payload: String) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or("window unavailable")?;
        let document = window.document().ok_or("document unavailable")?;
        let body = document.body().ok_or("missing body")?;

        let textarea = document
            .create_element("textarea")
            .map_err(|_| "Unable to create textarea")?
            .dyn_into::<web_sys::HtmlTextAreaElement>()
            .map_err(|_| "Textarea cast failed")?;
        textarea.set_value(&payload);
        let style = textarea.style();
        style.set_property("position", "fixed").ok();
        style.set_property("opacity", "0").ok();

        body.append_child(&textarea).ok();
        textarea.select();
        let html_document: web_sys::HtmlDocument = document
            .dyn_into()
            .map_err(|_| "Document cast failed")?;
        let copied = html_document.exec_command("copy").unwrap_or(false);
        textarea.remove();
        if copied {
            Ok(())
        } else {
            Err("Clipboard copy blocked".into())
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use arboard::Clipboard;

        let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
        clipboard.set_text(payload).map_err(|err| err.to_string())
    }
}

#[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Unable to create download".to_string())?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;

        let dir = crate::core::storage::FileStorage::in_data_dir()
            .map_err(|err| err.to_string())?
            .dir()
            .join("exports");
        fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let path = dir.join(filename);
        fs::write(&path, bytes).map_err(|err| err.to_string())?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{BodyPart, MeasurementEntry};

    #[test]
    fn csv_has_header_in_display_order() {
        let csv = build_csv(&AppState::default());
        assert_eq!(
            csv,
            "date,Chest,Shoulders,Arms,Weight,Thighs,Calves,Waist,Body Fat %\n"
        );
    }

    #[test]
    fn csv_rows_leave_missing_values_blank() {
        let state = AppState {
            entries: vec![MeasurementEntry::new(
                "2025-04-01",
                [(BodyPart::Chest, 42.5), (BodyPart::BodyFat, 17.0)]
                    .into_iter()
                    .collect(),
            )],
            goals: Vec::new(),
        };
        let csv = build_csv(&state);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "2025-04-01,42.5,,,,,,,17");
    }

    #[test]
    fn escape_quotes_fields_with_separators() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
