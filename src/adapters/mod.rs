// Adapters layer: conversions between student records/reports and external byte formats.

pub mod codec;
