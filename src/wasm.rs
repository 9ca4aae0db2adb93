//! WASM bindings for the family-tree-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! Inputs and outputs are JSON strings.

use log::Level;
use wasm_bindgen::prelude::*;

use crate::error::InputError;
use crate::layout::{inference, layout_family_tree, layout_from_root, LayoutConfig};
use crate::output::TreeOutput;
use crate::profile::{eligible_profiles, find_root, Profile, ProfileId};
use crate::relationship;

/// Route `log` output to the browser console and install the panic hook.
#[wasm_bindgen]
pub fn init_logging() {
    let _ = console_log::init_with_level(Level::Debug);
    console_error_panic_hook::set_once();
    log::info!("family tree logging initialized");
}

fn parse_profiles(profiles_json: &str) -> Result<Vec<Profile>, InputError> {
    serde_json::from_str(profiles_json).map_err(InputError::InvalidProfiles)
}

fn parse_config(config_json: &str) -> Result<LayoutConfig, InputError> {
    if config_json.trim().is_empty() {
        return Ok(LayoutConfig::default());
    }
    serde_json::from_str(config_json).map_err(InputError::InvalidConfig)
}

fn to_json(output: &TreeOutput) -> String {
    serde_json::to_string(output).unwrap_or_else(|e| {
        log::error!("Error serializing tree: {}", e);
        "{\"error\": {\"message\": \"Serialization error\"}}".to_string()
    })
}

fn render(result: Result<TreeOutput, InputError>) -> String {
    match result {
        Ok(output) => to_json(&output),
        Err(e) => {
            log::error!("{}", e);
            to_json(&TreeOutput::from_error(&e))
        }
    }
}

/// Lay out the tree around `focus_id`. Pass an empty focus to centre on the
/// primary profile and an empty config for the defaults.
#[wasm_bindgen]
pub fn compute_family_tree(profiles_json: &str, focus_id: &str, config_json: &str) -> String {
    render(try_compute(profiles_json, focus_id, config_json))
}

fn try_compute(profiles_json: &str, focus_id: &str, config_json: &str) -> Result<TreeOutput, InputError> {
    let profiles = parse_profiles(profiles_json)?;
    let cfg = parse_config(config_json)?;
    let focus = if focus_id.is_empty() { None } else { Some(ProfileId::new(focus_id)) };

    let result = layout_family_tree(&profiles, focus.as_ref(), &cfg);
    Ok(TreeOutput::from_layout(&result, &cfg))
}

/// Canonical layout centred on the primary profile.
#[wasm_bindgen]
pub fn compute_root_tree(profiles_json: &str, config_json: &str) -> String {
    render(parse_profiles(profiles_json).and_then(|profiles| {
        let cfg = parse_config(config_json)?;
        let result = layout_from_root(&profiles, &cfg);
        Ok(TreeOutput::from_layout(&result, &cfg))
    }))
}

/// Context-free inferred connection for one profile. Returns a JSON string
/// id, or `null` when nothing can be inferred.
#[wasm_bindgen]
pub fn infer_profile_connection(profiles_json: &str, profile_id: &str) -> String {
    let profiles = match parse_profiles(profiles_json) {
        Ok(p) => p,
        Err(e) => {
            log::error!("{}", e);
            return "null".to_string();
        }
    };
    let eligible = eligible_profiles(&profiles);
    let root = find_root(&eligible).map(|p| p.id.clone());

    let inferred = profiles
        .iter()
        .find(|p| p.id.as_str() == profile_id)
        .and_then(|p| inference::infer_connection(p, root.as_ref(), &eligible));

    serde_json::to_string(&inferred).unwrap_or_else(|_| "null".to_string())
}

/// Category name for a relationship label ("direct", "grandchild",
/// "nibling", "cousin"), or an empty string.
#[wasm_bindgen]
pub fn relationship_category(label: &str) -> String {
    relationship::category(label)
        .map(|c| c.as_str().to_string())
        .unwrap_or_default()
}
