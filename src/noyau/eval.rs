//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> deux piles (valeurs, opérateurs) -> f64
//!
//! Pas d’AST, pas de RPN intermédiaire : les opérateurs sont appliqués
//! dès que la précédence le permet. Chaque appel possède ses propres piles,
//! donc l’évaluation est pure et sans état partagé.

use super::erreur::ErrorKind;
use super::format::format_resultat;
use super::jetons::{format_tokens, tokenize, Token, TokenKind};

#[derive(Default, Clone, Debug, PartialEq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    /// Une ligne par opérateur appliqué, dans l’ordre : "3 * 4 = 12".
    pub etapes: Vec<String>,
}

/// Entrée de la pile d’opérateurs : un symbole en attente ou le marqueur '('.
#[derive(Clone, Copy, Debug)]
enum EnAttente<'a> {
    Op(&'a str),
    ParenOuvrante,
}

fn precedence(op: &str) -> u8 {
    match op {
        "+" | "-" => 1,
        "*" | "/" => 2,
        _ => 0,
    }
}

/// Application arithmétique (a op b).
/// La division par zéro est refusée AVANT de diviser (pas d’infini “silencieux”).
fn apply(a: f64, b: f64, op: &str) -> Result<f64, ErrorKind> {
    match op {
        "+" => Ok(a + b),
        "-" => Ok(a - b),
        "*" => Ok(a * b),
        "/" => {
            // vrai aussi pour -0.0
            if b == 0.0 {
                return Err(ErrorKind::DivisionByZero);
            }
            Ok(a / b)
        }
        _ => Err(ErrorKind::UnknownOperator(op.to_string())),
    }
}

/// Littéral décimal strict : chiffres ASCII, au plus un point, au moins un chiffre.
/// (le parse f64 de Rust accepterait aussi "inf", "1e3"… qu’on ne veut pas ici)
fn parse_nombre(text: &str) -> Result<f64, ErrorKind> {
    let chiffres = text.chars().filter(|c| c.is_ascii_digit()).count();
    let points = text.chars().filter(|&c| c == '.').count();

    if chiffres == 0 || points > 1 || chiffres + points != text.chars().count() {
        return Err(ErrorKind::MalformedNumber(text.to_string()));
    }

    text.parse::<f64>()
        .map_err(|_| ErrorKind::MalformedNumber(text.to_string()))
}

struct Moteur<'a> {
    valeurs: Vec<f64>,
    ops: Vec<EnAttente<'a>>,
    // None => pas de démarche (chemin rapide)
    etapes: Option<Vec<String>>,
}

impl<'a> Moteur<'a> {
    fn new(tracer: bool) -> Self {
        Self {
            valeurs: Vec::new(),
            ops: Vec::new(),
            etapes: tracer.then(Vec::new),
        }
    }

    /// Dépile l’opérateur du sommet et l’applique aux deux dernières valeurs.
    fn appliquer_sommet(&mut self) -> Result<(), ErrorKind> {
        let op = match self.ops.last() {
            Some(EnAttente::Op(op)) => *op,
            // les appelants s’arrêtent avant '(' : pile vide ou marqueur = parenthèse orpheline
            Some(EnAttente::ParenOuvrante) | None => return Err(ErrorKind::UnbalancedParens),
        };

        if self.valeurs.len() < 2 {
            return Err(ErrorKind::InsufficientOperands(op.to_string()));
        }
        let (Some(b), Some(a)) = (self.valeurs.pop(), self.valeurs.pop()) else {
            return Err(ErrorKind::InsufficientOperands(op.to_string()));
        };
        self.ops.pop();

        let r = apply(a, b, op)?;
        log::trace!("{a} {op} {b} = {r}");

        if let Some(etapes) = self.etapes.as_mut() {
            etapes.push(format!(
                "{} {op} {} = {}",
                format_resultat(a),
                format_resultat(b),
                format_resultat(r)
            ));
        }

        self.valeurs.push(r);
        Ok(())
    }

    fn operateur(&mut self, op: &'a str) -> Result<(), ErrorKind> {
        // associativité gauche : à précédence égale, on applique d’abord celui en attente
        while let Some(EnAttente::Op(sommet)) = self.ops.last() {
            if precedence(sommet) < precedence(op) {
                break;
            }
            self.appliquer_sommet()?;
        }
        self.ops.push(EnAttente::Op(op));
        Ok(())
    }

    fn paren_fermante(&mut self) -> Result<(), ErrorKind> {
        loop {
            match self.ops.last() {
                None => return Err(ErrorKind::UnbalancedParens),
                Some(EnAttente::ParenOuvrante) => {
                    self.ops.pop();
                    return Ok(());
                }
                Some(EnAttente::Op(_)) => self.appliquer_sommet()?,
            }
        }
    }

    fn consommer(&mut self, tokens: &'a [Token]) -> Result<(), ErrorKind> {
        for tok in tokens {
            match tok.kind {
                TokenKind::Number => {
                    let v = parse_nombre(&tok.text)?;
                    self.valeurs.push(v);
                }
                TokenKind::Operator => self.operateur(&tok.text)?,
                TokenKind::LeftParen => self.ops.push(EnAttente::ParenOuvrante),
                TokenKind::RightParen => self.paren_fermante()?,
            }
        }
        Ok(())
    }

    fn terminer(mut self) -> Result<(f64, Option<Vec<String>>), ErrorKind> {
        // vide la pile ops ; un '(' restant n’a jamais été fermé
        while let Some(sommet) = self.ops.last() {
            if let EnAttente::ParenOuvrante = sommet {
                return Err(ErrorKind::UnbalancedParens);
            }
            self.appliquer_sommet()?;
        }

        match self.valeurs.as_slice() {
            [v] => Ok((*v, self.etapes)),
            _ => Err(ErrorKind::MalformedExpression),
        }
    }
}

/// Évalue une suite de jetons (deux piles, gauche à droite).
/// Première erreur rencontrée = erreur retournée, sans reprise.
pub fn evaluate(tokens: &[Token]) -> Result<f64, ErrorKind> {
    let mut m = Moteur::new(false);
    m.consommer(tokens)?;
    m.terminer().map(|(v, _)| v)
}

/// API publique : texte -> f64 (tokenize puis evaluate, erreurs non réemballées).
pub fn evaluate_expression(expression: &str) -> Result<f64, ErrorKind> {
    let tokens = tokenize(expression)?;
    let r = evaluate(&tokens);
    log::debug!("{expression:?} -> {r:?}");
    r
}

/// Comme `evaluate_expression`, avec la démarche (jetons + opérations appliquées).
pub fn evaluate_expression_detaillee(
    expression: &str,
) -> Result<(f64, DemarcheNoyau), ErrorKind> {
    let tokens = tokenize(expression)?;

    let mut m = Moteur::new(true);
    m.consommer(&tokens)?;
    let (v, etapes) = m.terminer()?;

    let d = DemarcheNoyau {
        jetons: format_tokens(&tokens),
        etapes: etapes.unwrap_or_default(),
    };
    log::debug!("{expression:?} -> {v} ({} étapes)", d.etapes.len());

    Ok((v, d))
}
