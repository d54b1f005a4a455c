// Domain layer: student records, query/report types and the ports the core depends on.

pub mod model;
pub mod ports;
