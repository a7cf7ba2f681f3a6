//! Producto de pago único

use crate::models::payment::ProductInfo;

pub const PRICE_EUR: u32 = 89;
pub const CURRENCY_SYMBOL: &str = "€";
/// Moneda enviada al servicio de pago
pub const CURRENCY_CODE: &str = "eur";
pub const PRODUCT_NAME: &str = "ClimbHelp - Licence complète";
pub const PRODUCT_DESCRIPTION: &str =
    "Obtenez un accès à vie à ClimbHelp avec toutes les fonctionnalités incluses.";
pub const GUARANTEE_DAYS: u32 = 30;

pub const FEATURES: [&str; 10] = [
    "Suivi de progression illimité",
    "Recherche et découverte de salles",
    "Gestion complète des voies",
    "Statistiques avancées",
    "Historique complet des ascensions",
    "Comparaison avec amis",
    "Notifications personnalisées",
    "Export de vos données",
    "Mises à jour gratuites à vie",
    "Support technique inclus",
];

pub const SUCCESS_MESSAGE: &str = "🎉 Achat réussi ! Bienvenue dans ClimbHelp ! Vous allez recevoir vos identifiants de connexion par e-mail dans quelques minutes.";

/// Importe en céntimos para el payment intent
pub fn price_in_cents() -> u64 {
    u64::from(PRICE_EUR) * 100
}

pub fn product_info() -> ProductInfo {
    ProductInfo {
        name: PRODUCT_NAME,
        description: PRODUCT_DESCRIPTION,
        price: PRICE_EUR,
        currency: CURRENCY_SYMBOL,
        guarantee_days: GUARANTEE_DAYS,
        features: FEATURES.to_vec(),
    }
}
