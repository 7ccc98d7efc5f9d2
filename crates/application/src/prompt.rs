//! Prompt construction for toxic-text screening
//!
//! `build_prompt` is a pure function: the same input text always yields the
//! same message list, byte for byte. The user text is embedded verbatim,
//! quotes and all — sanitization is out of contract.

use domain::{ChatMessage, ToxicityCategory};

/// Fixed system prompt: category set, per-category definitions and examples,
/// few-shot classifications, and confidence calibration guidance.
///
/// The category labels here are the wire labels of
/// [`ToxicityCategory`]; the two must not drift apart.
pub const SYSTEM_PROMPT: &str = r#"Eres un clasificador experto de texto tóxico en videojuegos. Analiza cuidadosamente cada texto.

CATEGORÍAS CON EJEMPLOS CLAROS:

"insulto_al_nickname":
- Burlas o ataques al nombre de usuario femenino
- Ejemplos: "ese nombre de niña", "típico nick de mujer", "nombre ridículo"

"insulto_por_rol_en_juego":
- Ataques relacionados con roles específicos (support, healer, etc.)
- Ejemplos: "eres una support inútil", "las mujeres solo juegan healer", "support de mierda"

"insulto_asociado_a_un_esterotipo_domestico":
- Referencias a tareas domésticas o estereotipos de género
- Ejemplos: "vete a cocinar", "a lavar platos", "tu lugar está en la cocina"

"prejuicios":
- Suposiciones sobre habilidades en videojuegos por género
- Ejemplos: "las mujeres no saben jugar", "eres mala porque eres mujer", "no sirves para esto"

"lenguaje_ofensivo_o_amenaza":
- Insultos directos, palabrotas o amenazas
- Ejemplos: "perra", "zorra", "te voy a encontrar", lenguaje vulgar explícito

"texto_neutral":
- Cualquier texto que no encaje en las categorías anteriores
- Incluye críticas constructivas, comunicación normal del juego

EJEMPLOS DE CLASIFICACIÓN:

Texto: "vete a la cocina"
Respuesta: {"categoria": "insulto_asociado_a_un_esterotipo_domestico", "confianza": 0.95}

Texto: "eres mala jugando"
Respuesta: {"categoria": "prejuicios", "confianza": 0.8}

Texto: "buen juego, gracias por el heal"
Respuesta: {"categoria": "texto_neutral", "confianza": 0.9}

INSTRUCCIONES PARA CONFIANZA:
- 0.9-1.0: Muy claro, obviamente pertenece a la categoría
- 0.7-0.8: Probable, encaja bien en la categoría
- 0.5-0.6: Posible, pero no completamente claro
- 0.3-0.4: Dudoso, podría ser otra categoría
- 0.1-0.2: Muy incierto, probablemente neutral

IMPORTANTE: Si tienes dudas, es mejor asignar "texto_neutral" con baja confianza.

Responde únicamente con un objeto JSON: {"categoria": <categoria>, "confianza": <número entre 0 y 1>}."#;

/// Build the two-message prompt for one piece of user text.
///
/// The user text goes into the fixed template verbatim.
#[must_use]
pub fn build_prompt(user_text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!("Clasifica este texto: \"{user_text}\"")),
    ]
}

/// JSON schema constraining the reply to the fixed category contract.
///
/// Passed to the engine as a `response_format` schema when structured output
/// is enabled.
#[must_use]
pub fn response_schema() -> String {
    let labels: Vec<&str> = ToxicityCategory::all().iter().map(|c| c.label()).collect();

    serde_json::json!({
        "type": "object",
        "properties": {
            "categoria": {
                "type": "string",
                "enum": labels,
            },
            "confianza": {
                "type": "number",
            },
        },
        "required": ["categoria", "confianza"],
        "additionalProperties": false,
    })
    .to_string()
}
