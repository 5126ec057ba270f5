//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, digits, démarche,
//! historique) et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Bornes sur la lecture décimale (digits).

use calculatrice_flottante::noyau::format::DIGITS_MAX;
use calculatrice_flottante::service::Registre;

/// Précision de lecture décimale par défaut.
const DIGITS_DEFAUT: usize = 10;

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub etapes: String,
}

#[derive(Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,    // affichage court (plus petite écriture exacte du f64)
    pub lecture: String,     // lecture décimale à digits fixes
    pub erreur: String,      // message d’erreur (si l’évaluation échoue)
    pub lecture_dispo: bool, // false si vide / erreur

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- historique (registre possédé par l’app) ---
    pub registre: Registre,

    // --- paramètres ---
    pub digits: usize,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            lecture: String::new(),
            erreur: String::new(),
            lecture_dispo: false,
            demarche: Demarche::default(),
            registre: Registre::new(),
            digits: DIGITS_DEFAUT,
            focus_entree: true,
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + historique + digits par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.registre.vider();
        self.digits = DIGITS_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    fn clear_demarche(&mut self) {
        self.demarche = Demarche::default();
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.lecture.clear();
        self.erreur.clear();
        self.lecture_dispo = false;
        self.clear_demarche();
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// On CONSERVE `resultat` (dernier résultat) pour ne pas “effacer l’écran” sur une faute ;
    /// lecture + démarche sont coupées.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();

        self.lecture.clear();
        self.lecture_dispo = false;

        self.clear_demarche();

        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat complet.
    pub fn set_resultats(
        &mut self,
        resultat: impl Into<String>,
        lecture: String,
        demarche: Demarche,
    ) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.demarche = demarche;

        self.lecture = lecture;
        self.lecture_dispo = true;

        self.focus_entree = true;
    }

    /// Garde-fou : limite digits.
    pub fn set_digits(&mut self, digits: usize) {
        self.digits = digits.min(DIGITS_MAX);
        self.focus_entree = true;
    }
}
