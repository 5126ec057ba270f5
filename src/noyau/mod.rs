//! Noyau flottant
//!
//! Organisation interne :
//! - erreur.rs   : ErrorKind (ensemble fermé d’erreurs classées)
//! - jetons.rs   : tokenisation
//! - eval.rs     : deux piles (valeurs / opérateurs) + démarche
//! - format.rs   : affichage court + lecture décimale

pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;


// API publique minimale
pub use erreur::ErrorKind;
pub use eval::{evaluate, evaluate_expression, evaluate_expression_detaillee, DemarcheNoyau};
pub use jetons::{tokenize, Token, TokenKind};
