use image::RgbaImage;
use tracing::{info, warn};

use crate::config::ScanConfig;
use crate::extract::extract_region;
use crate::frame::EditorLayout;
use crate::payload::{parse_payload, IdentityRecord, PayloadError, Sex};
use crate::qr::{decode_qr, DecodeOutcome, SymbolDecoder};
use crate::selection::SelectionRegion;
use crate::transform::TransformState;

/// Which bitmap the payload was decoded from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanSource {
    /// Crop of the original bitmap under the scan box.
    Region,
    /// The whole edited bitmap.
    FullImage,
}

/// Definite result of an autofill scan.
#[derive(Clone, Debug, PartialEq)]
pub enum ScanOutcome {
    Parsed {
        record: IdentityRecord,
        raw: String,
        source: ScanSource,
    },
    /// No QR code could be read (or the scan box missed the image).
    NotFound,
    /// A QR code was read but its content is not a usable payload.
    Unparseable { raw: String, error: PayloadError },
}

/// Inputs of one scan.
pub struct ScanRequest<'a> {
    /// The original, unedited bitmap.
    pub original: &'a RgbaImage,
    pub selection: Option<&'a SelectionRegion>,
    /// Transform active when the scan box was placed.
    pub transform: &'a TransformState,
    pub layout: &'a EditorLayout,
    /// Edited bitmap scanned whole when the region yields nothing.
    pub fallback: Option<&'a RgbaImage>,
}

/// Region extraction, QR decode and payload parsing, in that order.
pub fn scan_identity(
    request: &ScanRequest<'_>,
    config: &ScanConfig,
    decoder: &dyn SymbolDecoder,
) -> ScanOutcome {
    let mut decoded = None;

    if let Some(selection) = request.selection {
        match extract_region(request.original, selection, request.transform, request.layout) {
            Ok(region) => {
                if let DecodeOutcome::Found { payload, .. } = decode_qr(&region.image, config, decoder) {
                    decoded = Some((payload, ScanSource::Region));
                }
            }
            Err(e) => warn!(error = %e, "Scan region empty, treating as not found"),
        }
    }

    if decoded.is_none() && config.fallback_to_full_image {
        if let Some(full) = request.fallback {
            if let DecodeOutcome::Found { payload, .. } = decode_qr(full, config, decoder) {
                decoded = Some((payload, ScanSource::FullImage));
            }
        }
    }

    let Some((raw, source)) = decoded else {
        info!("No QR code found");
        return ScanOutcome::NotFound;
    };

    match parse_payload(&raw) {
        Ok(record) => {
            info!(source = ?source, "ID payload parsed");
            ScanOutcome::Parsed {
                record,
                raw,
                source,
            }
        }
        Err(error) => {
            warn!(error = %error, "QR payload unreadable");
            ScanOutcome::Unparseable { raw, error }
        }
    }
}

/// What the form should tell the user after a scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutofillStatus {
    Filled,
    NotFound,
    Unreadable,
}

impl AutofillStatus {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Filled => "Fields filled from the ID card QR code.",
            Self::NotFound => "No QR code found. Move the scan box over the QR code and try again.",
            Self::Unreadable => "QR code found but its data is unreadable. Please retake the photo.",
        }
    }
}

/// Registration-form fields filled from an ID card scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AutofillForm {
    pub id_number: String,
    pub full_name: String,
    /// `YYYY-MM-DD` or empty.
    pub birth_date: String,
    pub sex: Sex,
    pub address: String,
}

impl AutofillForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Clear every field, then fill from a parsed record. Failed scans leave
    /// the form empty, never holding values from an earlier scan.
    pub fn apply(&mut self, outcome: &ScanOutcome) -> AutofillStatus {
        self.clear();
        match outcome {
            ScanOutcome::Parsed { record, .. } => {
                self.id_number = record.id_number.clone();
                self.full_name = record.full_name.clone();
                self.birth_date = record.birth_date_iso();
                self.sex = record.sex;
                self.address = record.address.clone();
                AutofillStatus::Filled
            }
            ScanOutcome::NotFound => AutofillStatus::NotFound,
            ScanOutcome::Unparseable { .. } => AutofillStatus::Unreadable,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
