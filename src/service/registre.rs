// src/service/registre.rs
//
// Registre des expressions soumises (id -> statut/résultat).
//
// Contrats :
// - Magasin possédé, créé explicitement par son propriétaire (UI, appelant),
//   passé par référence : aucune table globale.
// - Un seul verrou ; une acquisition par mise à jour logique
//   (enregistrer “pending”, puis déposer l’issue).
// - L’évaluation se fait HORS verrou.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::noyau::{evaluate_expression, ErrorKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statut {
    Pending,
    Done,
    Error,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpressionEnregistree {
    pub id: String,
    pub expression: String,
    #[serde(rename = "status")]
    pub statut: Statut,
    /// 0 tant que `statut != Done` (on ne lit jamais ce champ sans regarder le statut).
    #[serde(rename = "result")]
    pub resultat: f64,
    #[serde(rename = "error", default, skip_serializing_if = "Option::is_none")]
    pub erreur: Option<String>,
}

#[derive(Default, Debug)]
struct Table {
    prochain_id: u64,
    entrees: BTreeMap<u64, ExpressionEnregistree>,
}

impl Table {
    fn nouvelle_entree(&mut self, expression: &str) -> u64 {
        self.prochain_id += 1;
        let n = self.prochain_id;
        self.entrees.insert(
            n,
            ExpressionEnregistree {
                id: n.to_string(),
                expression: expression.to_string(),
                statut: Statut::Pending,
                resultat: 0.0,
                erreur: None,
            },
        );
        n
    }
}

impl ExpressionEnregistree {
    fn terminer(&mut self, issue: &Result<f64, ErrorKind>) {
        match issue {
            Ok(v) => {
                self.statut = Statut::Done;
                self.resultat = *v;
            }
            Err(err) => {
                self.statut = Statut::Error;
                self.erreur = Some(err.to_string());
            }
        }
    }
}

#[derive(Default, Debug)]
pub struct Registre {
    table: Mutex<Table>,
}

impl Registre {
    pub fn new() -> Self {
        Self::default()
    }

    // Verrou empoisonné : chaque mise à jour est complète, la table reste lisible.
    fn verrou(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enregistre l’expression en “pending”, l’évalue hors verrou, puis dépose l’issue.
    /// Retourne l’id attribué.
    pub fn soumettre(&self, expression: &str) -> String {
        let n = self.enregistrer(expression);
        let issue = evaluate_expression(expression);
        self.deposer(n, &issue);
        n.to_string()
    }

    /// Consigne une évaluation déjà faite par l’appelant (historique UI) :
    /// une seule acquisition du verrou, l’entrée naît directement terminée.
    pub fn consigner(&self, expression: &str, issue: &Result<f64, ErrorKind>) -> String {
        let mut t = self.verrou();
        let n = t.nouvelle_entree(expression);
        if let Some(e) = t.entrees.get_mut(&n) {
            e.terminer(issue);
        }
        n.to_string()
    }

    fn deposer(&self, n: u64, issue: &Result<f64, ErrorKind>) {
        if let Some(e) = self.verrou().entrees.get_mut(&n) {
            e.terminer(issue);
        }
    }

    fn enregistrer(&self, expression: &str) -> u64 {
        let n = self.verrou().nouvelle_entree(expression);
        log::info!("expression {n} enregistrée: {expression:?}");
        n
    }

    pub fn obtenir(&self, id: &str) -> Option<ExpressionEnregistree> {
        let n: u64 = id.parse().ok()?;
        // forme canonique seulement : "01" ou "+1" ne désignent pas l’entrée "1"
        if n.to_string() != id {
            return None;
        }
        self.verrou().entrees.get(&n).cloned()
    }

    /// Toutes les entrées, par id croissant (ordre de soumission).
    pub fn lister(&self) -> Vec<ExpressionEnregistree> {
        self.verrou().entrees.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.verrou().entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Efface les entrées ; les ids continuent de croître (jamais réutilisés).
    pub fn vider(&self) {
        self.verrou().entrees.clear();
    }
}
