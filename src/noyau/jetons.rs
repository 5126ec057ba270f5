// src/noyau/jetons.rs

use super::erreur::ErrorKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Operator,
    LeftParen,
    RightParen,
}

/// Jeton : genre + texte source.
/// Les nombres gardent leur littéral tel quel ; la conversion en f64 se fait à l’évaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (chiffres + point), ex: 12, 3.5
///   (un chiffre non ASCII, ex: '٣', est gardé dans le littéral et refusé à l’évaluation)
/// - opérateurs + - * /
/// - parenthèses ( )
/// - espaces (ignorés)
///
/// Tout autre caractère => `UnknownSymbol`, on s’arrête au premier.
/// Aucune vérification de placement ici (ex: "1++2") : l’évaluation s’en charge.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, ErrorKind> {
    let mut out = Vec::new();
    let mut nombre = String::new();

    for (position, c) in expression.chars().enumerate() {
        // tout chiffre Unicode entre dans le littéral ; seul l’ASCII se lit ensuite (MalformedNumber sinon)
        if c.is_numeric() || c == '.' {
            nombre.push(c);
            continue;
        }

        if !nombre.is_empty() {
            out.push(Token::new(TokenKind::Number, std::mem::take(&mut nombre)));
        }

        match c {
            '+' | '-' | '*' | '/' => out.push(Token::new(TokenKind::Operator, c)),
            '(' => out.push(Token::new(TokenKind::LeftParen, c)),
            ')' => out.push(Token::new(TokenKind::RightParen, c)),
            ' ' => {}
            _ => {
                return Err(ErrorKind::UnknownSymbol {
                    symbole: c,
                    position,
                })
            }
        }
    }

    if !nombre.is_empty() {
        out.push(Token::new(TokenKind::Number, nombre));
    }

    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
