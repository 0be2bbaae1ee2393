// src/common/i18n.rs
//
// Catálogo de mensagens da API. As chaves são as mesmas usadas como `code`
// nas validações e em `AppError::message_key`.

pub const DEFAULT_LANGUAGE: &str = "en";
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "pt"];

pub fn translate(lang: &str, key: &str) -> Option<&'static str> {
    let message = match (lang, key) {
        // --- Recursos ---
        ("pt", "product.not_found") => "Produto não encontrado.",
        (_, "product.not_found") => "Product not found.",
        ("pt", "product.code_exists") => "Já existe um produto com este código.",
        (_, "product.code_exists") => "Product code already exists.",

        ("pt", "raw_material.not_found") => "Matéria-prima não encontrada.",
        (_, "raw_material.not_found") => "Raw material not found.",
        ("pt", "raw_material.code_exists") => "Já existe uma matéria-prima com este código.",
        (_, "raw_material.code_exists") => "Raw material code already exists.",
        ("pt", "raw_material.in_use") => "A matéria-prima é usada na ficha técnica de um ou mais produtos.",
        (_, "raw_material.in_use") => "Raw material is used by one or more products.",

        ("pt", "product_material.not_found") => "Item da ficha técnica não encontrado.",
        (_, "product_material.not_found") => "Product material not found.",
        ("pt", "product_material.exists") => "Esta matéria-prima já faz parte do produto.",
        (_, "product_material.exists") => "Raw material already added to this product.",

        // --- Genéricos ---
        ("pt", "validation.failed") => "Um ou mais campos são inválidos.",
        (_, "validation.failed") => "Validation failed.",
        ("pt", "request.invalid") => "Requisição malformada.",
        (_, "request.invalid") => "Malformed request.",
        ("pt", "value.out_of_range") => "Um ou mais valores estão fora dos limites aceitos.",
        (_, "value.out_of_range") => "One or more values are outside the accepted limits.",
        ("pt", "internal") => "Ocorreu um erro inesperado.",
        (_, "internal") => "Unexpected error.",

        // --- Códigos de validação (campo a campo) ---
        ("pt", "required") => "O campo é obrigatório.",
        (_, "required") => "must not be blank",
        ("pt", "too_long") => "O valor excede o tamanho máximo.",
        (_, "too_long") => "is too long",
        ("pt", "not_negative") => "O valor não pode ser negativo.",
        (_, "not_negative") => "must be greater than or equal to 0",
        ("pt", "positive") => "O valor deve ser maior que zero.",
        (_, "positive") => "must be greater than 0",
        ("pt", "too_many_decimals") => "O valor tem casas decimais demais.",
        (_, "too_many_decimals") => "has too many decimal places",
        ("pt", "out_of_range") => "O valor excede o limite permitido.",
        (_, "out_of_range") => "is out of range",

        _ => return None,
    };

    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_english_for_unknown_language() {
        assert_eq!(translate("de", "product.not_found"), Some("Product not found."));
    }

    #[test]
    fn every_key_has_both_languages() {
        let keys = [
            "product.not_found",
            "product.code_exists",
            "raw_material.not_found",
            "raw_material.code_exists",
            "raw_material.in_use",
            "product_material.not_found",
            "product_material.exists",
            "validation.failed",
            "request.invalid",
            "internal",
            "required",
            "too_long",
            "not_negative",
            "positive",
            "too_many_decimals",
            "out_of_range",
            "value.out_of_range",
        ];
        for key in keys {
            for lang in SUPPORTED_LANGUAGES {
                assert!(translate(lang, key).is_some(), "missing {lang}/{key}");
            }
            assert_ne!(translate("en", key), translate("pt", key), "{key}");
        }
    }

    #[test]
    fn unknown_key_is_none() {
        assert_eq!(translate("en", "nope"), None);
    }
}
