//! Service — traitement des requêtes JSON (sans transport)
//!
//! - traiter_calcul        : {"expression"} -> {"result","error"} + statut HTTP
//! - traiter_soumission    : enregistre dans le Registre -> {"id"}
//! - traiter_liste         : {"expressions": [...]}
//! - traiter_consultation  : {"expression": {...}} ou 404
//!
//! Le branchement sur un vrai serveur HTTP reste à l’appelant :
//! chaque fonction prend un corps texte et rend (statut, corps JSON).

pub mod registre;

use serde::{Deserialize, Serialize};

use crate::noyau::{evaluate_expression, ErrorKind};

pub use registre::{ExpressionEnregistree, Registre, Statut};

pub const OK: u16 = 200;
pub const CREATED: u16 = 201;
pub const BAD_REQUEST: u16 = 400;
pub const NOT_FOUND: u16 = 404;
pub const UNPROCESSABLE_ENTITY: u16 = 422;
pub const INTERNAL_SERVER_ERROR: u16 = 500;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReponseService {
    pub statut: u16,
    pub corps: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ExpressionRequest {
    pub expression: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpressionResponse {
    pub error: String,
    pub result: f64,
}

/// Correspondance erreur -> (statut, message visible).
/// Division par zéro et symbole inconnu ont chacun leur message ; le reste est “requête invalide”.
/// Partagée avec l’UI.
pub fn code_erreur(e: &ErrorKind) -> (u16, &'static str) {
    match e {
        ErrorKind::DivisionByZero => (BAD_REQUEST, "division par zéro"),
        ErrorKind::UnknownSymbol { .. } => (UNPROCESSABLE_ENTITY, "symbole inconnu"),
        _ => (BAD_REQUEST, "requête invalide"),
    }
}

fn json<T: Serialize>(statut: u16, valeur: &T) -> ReponseService {
    match serde_json::to_string(valeur) {
        Ok(corps) => ReponseService { statut, corps },
        Err(e) => {
            log::error!("sérialisation impossible: {e}");
            ReponseService {
                statut: INTERNAL_SERVER_ERROR,
                corps: r#"{"error":"erreur interne"}"#.to_string(),
            }
        }
    }
}

fn lire_requete(corps: &str) -> Result<ExpressionRequest, serde_json::Error> {
    serde_json::from_str(corps).inspect_err(|e| log::warn!("corps rejeté: {e}"))
}

/// Calcul direct : évalue et répond dans la foulée.
pub fn traiter_calcul(corps: &str) -> ReponseService {
    let req = match lire_requete(corps) {
        Ok(req) => req,
        Err(_) => {
            return json(
                BAD_REQUEST,
                &ExpressionResponse {
                    error: "corps de requête invalide".into(),
                    result: 0.0,
                },
            )
        }
    };

    match evaluate_expression(&req.expression) {
        Ok(result) => json(
            OK,
            &ExpressionResponse {
                error: String::new(),
                result,
            },
        ),
        Err(e) => {
            let (statut, message) = code_erreur(&e);
            log::warn!("{:?} rejetée: {e}", req.expression);
            json(
                statut,
                &ExpressionResponse {
                    error: message.into(),
                    result: 0.0,
                },
            )
        }
    }
}

#[derive(Serialize)]
struct IdReponse {
    id: String,
}

#[derive(Serialize)]
struct ListeReponse {
    expressions: Vec<ExpressionEnregistree>,
}

#[derive(Serialize)]
struct UneReponse {
    expression: ExpressionEnregistree,
}

#[derive(Serialize)]
struct ErreurReponse {
    error: &'static str,
}

/// Soumission : l’expression est évaluée par le registre ; on rend son id.
pub fn traiter_soumission(registre: &Registre, corps: &str) -> ReponseService {
    match lire_requete(corps) {
        Ok(req) => {
            let id = registre.soumettre(&req.expression);
            json(CREATED, &IdReponse { id })
        }
        Err(_) => json(
            UNPROCESSABLE_ENTITY,
            &ErreurReponse {
                error: "corps de requête invalide",
            },
        ),
    }
}

pub fn traiter_liste(registre: &Registre) -> ReponseService {
    json(
        OK,
        &ListeReponse {
            expressions: registre.lister(),
        },
    )
}

pub fn traiter_consultation(registre: &Registre, id: &str) -> ReponseService {
    match registre.obtenir(id) {
        Some(expression) => json(OK, &UneReponse { expression }),
        None => json(
            NOT_FOUND,
            &ErreurReponse {
                error: "expression introuvable",
            },
        ),
    }
}
