use log::{debug, info};

use super::TransitionRecord;
use crate::catalog::DatabaseCatalog;
use crate::config::{DatabaseSource, WavelengthWindow};
use crate::drivers::{LineDatabase, TransitionColumns};
use crate::error::{LineReadError, Result};

/// Read every source and concatenate its transitions with global isotope ids.
///
/// Sources are read in input order, duplicates included. Each source's
/// local ids are shifted by the offset of the database it resolves to in
/// `catalog`. All reads finish before the output buffer is allocated, so
/// the buffer is sized exactly once.
pub fn collect_transitions(
    drivers: &[Box<dyn LineDatabase>],
    sources: &[DatabaseSource],
    catalog: &DatabaseCatalog,
    window: &WavelengthWindow,
) -> Result<Vec<TransitionRecord>> {
    if drivers.len() != sources.len() || drivers.len() != catalog.source_count() {
        return Err(LineReadError::config(format!(
            "{} drivers for {} sources ({} catalogued)",
            drivers.len(),
            sources.len(),
            catalog.source_count()
        )));
    }

    let mut per_source = Vec::with_capacity(drivers.len());
    for (i, (driver, source)) in drivers.iter().zip(sources).enumerate() {
        let columns = driver
            .read_transitions(window)
            .map_err(|e| LineReadError::transition_read(&source.path, e))?;
        check_columns(&columns, catalog.isotope_count(i))
            .map_err(|reason| LineReadError::transition_read(&source.path, reason))?;

        info!(
            "File {} ('{}'): {} transitions",
            i + 1,
            driver.name(),
            columns.len()
        );
        debug!(
            "Isotope offset for '{}': {}",
            driver.name(),
            catalog.offset(i)
        );
        per_source.push(columns);
    }

    let total: usize = per_source.iter().map(TransitionColumns::len).sum();
    let mut records = Vec::with_capacity(total);

    for (i, columns) in per_source.into_iter().enumerate() {
        let offset = catalog.offset(i);
        let rows = columns
            .wavelength
            .iter()
            .zip(&columns.gf)
            .zip(&columns.elow)
            .zip(&columns.isotope);
        for (((&wavelength, &gf), &elow), &local) in rows {
            let global = offset + usize::from(local);
            let isotope = i16::try_from(global).map_err(|_| {
                LineReadError::config(format!("global isotope id {global} exceeds int16 range"))
            })?;
            records.push(TransitionRecord {
                wavelength,
                gf,
                elow,
                isotope,
            });
        }
    }

    Ok(records)
}

fn check_columns(columns: &TransitionColumns, isotope_count: usize) -> std::result::Result<(), String> {
    columns.validate()?;
    if let Some(&bad) = columns
        .isotope
        .iter()
        .find(|&&local| usize::from(local) >= isotope_count)
    {
        return Err(format!(
            "local isotope id {bad} is not declared (database has {isotope_count} isotopes)"
        ));
    }
    Ok(())
}
