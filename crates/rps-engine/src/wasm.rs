//! WASM bindings for frontend resolution previews

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{resolve, resolve_indices, EngineConfig, Symbol};

/// Resolve a match between two wire symbols (0 = Rock, 1 = Paper, 2 = Scissors)
///
/// # Returns
/// The outcome label: "Draw", "Winner: player1" or "Winner: player2"
#[wasm_bindgen]
pub fn resolve_match(symbol_1: u8, symbol_2: u8) -> Result<String, JsError> {
    let outcome = resolve_indices(symbol_1, symbol_2)
        .map_err(|e| JsError::new(&e.to_string()))?;
    Ok(outcome.label().to_string())
}

#[derive(serde::Serialize)]
struct OutcomeRow {
    symbol_1: Symbol,
    symbol_2: Symbol,
    outcome: &'static str,
}

/// All nine symbol pairs with their outcome labels
#[wasm_bindgen]
pub fn get_outcome_table() -> Result<JsValue, JsError> {
    let mut rows = Vec::with_capacity(9);
    for symbol_1 in Symbol::ALL {
        for symbol_2 in Symbol::ALL {
            rows.push(OutcomeRow {
                symbol_1,
                symbol_2,
                outcome: resolve(symbol_1, symbol_2).label(),
            });
        }
    }

    serde_wasm_bindgen::to_value(&rows)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Default engine configuration as JSON (ratio, minimum deposit, bids)
#[wasm_bindgen]
pub fn get_default_config() -> Result<String, JsError> {
    serde_json::to_string(&EngineConfig::default())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Internal units credited for a deposit of `value`, as a decimal string
#[wasm_bindgen]
pub fn units_for_deposit(value: &str) -> Result<String, JsError> {
    let value: u128 = value
        .parse()
        .map_err(|_| JsError::new("Value must be a non-negative integer"))?;
    let units = EngineConfig::default()
        .to_units(value)
        .map_err(|e| JsError::new(&e.to_string()))?;
    Ok(units.to_string())
}

/// Symbol names indexed by wire value
#[wasm_bindgen]
pub fn get_symbol_names() -> js_sys::Array {
    Symbol::ALL
        .iter()
        .map(|symbol| JsValue::from_str(&symbol.to_string()))
        .collect()
}
