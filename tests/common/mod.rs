#![allow(dead_code)]

use checkout_forms::application::engine::FormEngine;
use checkout_forms::config::FormConfig;
use checkout_forms::domain::country::StaticCountryCatalog;
use checkout_forms::forms::mbway::{MBWayForm, MBWayPaymentMethod};
use checkout_forms::infrastructure::in_memory::InMemorySubmissionHandler;
use std::io::Error;
use std::path::{Path, PathBuf};

/// Writes an `action,field,value` event file into `dir`.
pub fn write_events(dir: &Path, name: &str, rows: &[[&str; 3]]) -> Result<PathBuf, Error> {
    let path = dir.join(name);
    let mut wtr = csv::WriterBuilder::new().from_path(&path)?;
    wtr.write_record(["action", "field", "value"])?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(path)
}

pub fn mbway_engine(
    config: FormConfig,
) -> (FormEngine<MBWayForm>, InMemorySubmissionHandler<MBWayPaymentMethod>) {
    let handler = InMemorySubmissionHandler::new();
    let form = MBWayForm::new(&StaticCountryCatalog::new(), &config);
    let engine = FormEngine::new(form, config, Box::new(handler.clone())).expect("complete registry");
    (engine, handler)
}
