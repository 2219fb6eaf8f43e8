//! WASM bindings for the report session

use crate::config::ReportConfig;
use crate::export::PdfEngine;
use crate::model::{AnalysisRequest, Gender};
use crate::session::ReportSession;
use crate::compose::REPORT_TITLE;
use chrono::NaiveDate;
use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse_date(iso: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("invalid date {:?}: {}", iso, e)))
}

/// WASM-exposed report session. View updates are returned as JSON arrays
/// of ops for the page script to apply.
#[wasm_bindgen]
pub struct WasmReport {
    session: ReportSession,
}

impl Default for WasmReport {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmReport {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: ReportSession::new(ReportConfig::default()),
        }
    }

    /// Create a session from a JSON config
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> Result<WasmReport, JsValue> {
        let config: ReportConfig = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        config
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            session: ReportSession::new(config),
        })
    }

    /// Check form input before it is sent. Returns the banner text, or
    /// `undefined` when the input is acceptable.
    #[wasm_bindgen(js_name = checkRequest)]
    pub fn check_request(name: &str, date_of_birth: &str, gender: &str) -> Option<String> {
        let gender = match gender {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        };
        let request = AnalysisRequest {
            name: name.to_string(),
            date_of_birth: date_of_birth.to_string(),
            gender,
        };
        request.validate().err().map(|e| e.notice())
    }

    /// Take in a raw analysis response; returns the view ops as JSON
    pub fn receive(&mut self, response_json: &str) -> Result<String, JsValue> {
        let update = self.session.receive(response_json);
        update
            .frame
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// View ops hiding the results panel and error banner
    pub fn reset(&self) -> Result<String, JsValue> {
        self.session
            .reset()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = hasReport)]
    pub fn has_report(&self) -> bool {
        self.session.current().is_some()
    }

    /// Export the held report as PDF bytes. Fails with the user-facing
    /// notice text.
    #[wasm_bindgen(js_name = exportPdf)]
    pub fn export_pdf(&self, today_iso: &str) -> Result<Uint8Array, JsValue> {
        let today = parse_date(today_iso)?;
        let mut engine = PdfEngine::new().with_title(REPORT_TITLE);
        let artifact = self
            .session
            .export(&mut engine, today)
            .map_err(|e| JsValue::from_str(e.notice()))?;
        Ok(Uint8Array::from(artifact.bytes.as_slice()))
    }

    /// File name the exported PDF should be saved under
    #[wasm_bindgen(js_name = exportFileName)]
    pub fn export_file_name(&self, today_iso: &str) -> Result<String, JsValue> {
        let today = parse_date(today_iso)?;
        let model = self
            .session
            .current()
            .ok_or_else(|| JsValue::from_str(crate::error::NOTHING_TO_EXPORT_NOTICE))?;
        let config = self.session.config();
        Ok(crate::export::artifact_file_name(
            &config.artifact_prefix,
            &model.subject_name,
            today,
            &config.artifact_extension,
        ))
    }
}
