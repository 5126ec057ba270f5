//! Calculatrice flottante — bibliothèque
//!
//! - noyau   : tokenisation + évaluation deux piles (f64, erreurs classées)
//! - service : requêtes JSON sans transport + registre des expressions

pub mod noyau;
pub mod service;

pub use noyau::{evaluate_expression, ErrorKind};
