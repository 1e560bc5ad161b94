//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al schema PostgreSQL del portal.

pub mod company;
pub mod document;
pub mod caller;
