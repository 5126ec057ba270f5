// src/noyau/erreur.rs
//
// Erreurs classées du noyau.
// Ensemble fermé : chaque échec (lecture, pile, parenthèses, arithmétique)
// tombe dans une et une seule variante. Jamais de “0 par défaut”.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErrorKind {
    /// Caractère hors alphabet (chiffres, '.', + - * /, parenthèses, espace).
    #[error("symbole inconnu '{symbole}' (position {position})")]
    UnknownSymbol { symbole: char, position: usize },

    /// Littéral numérique illisible (vide, plusieurs points, '.' seul…).
    #[error("nombre mal formé: '{0}'")]
    MalformedNumber(String),

    /// Un opérateur n’a pas ses deux opérandes sur la pile.
    #[error("opérandes insuffisants pour '{0}'")]
    InsufficientOperands(String),

    #[error("parenthèses non équilibrées")]
    UnbalancedParens,

    #[error("division par zéro")]
    DivisionByZero,

    /// La pile de valeurs ne contient pas exactement un élément en fin de calcul.
    #[error("expression mal formée")]
    MalformedExpression,

    #[error("opérateur inconnu '{0}'")]
    UnknownOperator(String),
}
