use std::fmt;

use thesis_core::ThesisData;

use crate::oracle::GenerationRequest;

/// BCP 47-ish language tag such as `en-US` or `pt-BR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if tag.trim().is_empty() {
            Self::default()
        } else {
            Self(tag.trim().to_string())
        }
    }

    pub fn tag(&self) -> &str {
        &self.0
    }

    /// The primary language subtag: `pt-BR` becomes `pt`.
    pub fn language_code(&self) -> &str {
        self.0.split('-').next().unwrap_or("en")
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct GenerationPrompts;

impl GenerationPrompts {
    pub fn strategist_role(locale: &Locale) -> &'static str {
        match locale.language_code() {
            "pt" => "Você é um estrategista de negócios de classe mundial.",
            "es" => "Eres un estratega de negocios de clase mundial.",
            _ => "You are a world-class business strategist.",
        }
    }

    pub fn manifesto_instruction(locale: &Locale) -> &'static str {
        match locale.language_code() {
            "pt" => "Construa um prompt completo, seguindo a estrutura do \"PROMPT-MANIFESTO DE CODIFICAÇÃO PARA MVP\".",
            "es" => "Construye un prompt completo, siguiendo la estructura del \"PROMPT-MANIFIESTO DE CODIFICACIÓN PARA MVP\".",
            _ => "Build a complete prompt, following the structure of the \"CODING PROMPT-MANIFESTO FOR MVP\".",
        }
    }

    /// Every field the model must fill, as an empty example document.
    pub fn thesis_skeleton() -> String {
        let skeleton = ThesisData {
            unicorn_score: Some(0.0),
            ..Default::default()
        };
        serde_json::to_string_pretty(&skeleton).unwrap_or_else(|_| "{}".to_string())
    }

    fn protocol(locale: &Locale) -> String {
        format!(
            r#"<strategy_protocol>
<phase id="0" name="Activation">
Treat the three user inputs below as the excavation domain, the creator's context and the ambition level.
</phase>
<phase id="1" name="Deconstruction and first principles">
1.1. First-principles reasoning: the irreducible human need, the non-negotiable truths, and the market conventions worth challenging, each with a radical counter-hypothesis.
1.2. Jobs To Be Done: the main job (verb, object, context, outcome), its functional, emotional and social dimensions, and the four forces of progress (push, pull, anxiety, habit).
</phase>
<phase id="2" name="Ecosystem analysis">
2.1. PESTEL analysis.
2.2. Porter's five forces.
2.3. Blue Ocean strategy (eliminate, reduce, raise, create).
</phase>
<phase id="3" name="Ideation and synthesis">
3.1. SCAMPER brainstorming.
3.2. Analogies from adjacent domains.
3.3. Cluster the ideas into exactly 3 solution hypotheses and select them.
</phase>
<phase id="4" name="Business modeling">
4.1. A Lean Canvas for each of the 3 selected hypotheses.
4.2. A Hook Model for each of the 3 selected hypotheses.
4.3. A growth flywheel for each of the 3 selected hypotheses.
</phase>
<phase id="5" name="Final thesis">
5.1. Final selection of one business model and its justification.
5.2. The product manifesto: name, thesis statement and detailed blueprint.
5.3. Unicorn score: assign a score from 0 to 100 weighing market size and growth (25%), competitive moat (25%), execution feasibility with the given resources (25%) and founder-market fit (25%). Provide it as a number.
</phase>
<phase id="6" name="Coding prompt-manifesto">
{instruction}
</phase>
</strategy_protocol>"#,
            instruction = Self::manifesto_instruction(locale),
        )
    }

    /// The single prompt that asks for a complete thesis and its manifesto.
    pub fn thesis(request: &GenerationRequest) -> String {
        format!(
            r#"{role}

**CRITICAL INSTRUCTION: OUTPUT LANGUAGE**
You MUST write the entire JSON output, including every string inside "thesisData" and the "manifesto", exclusively in the language with code: **{language}**.

**USER INPUT PARAMETERS:**
* **Excavation Domain:** "{domain}"
* **Creator Context:** "{context}"
* **Ambition Level:** "{ambition}"

**PROTOCOL TO EXECUTE:**
{protocol}

**FINAL TASK:**
After executing every phase internally, produce one JSON object with exactly two top-level keys: "thesisData" and "manifesto".

1. **"thesisData"**: the synthesized analysis, following this schema exactly. "selectedHypotheses" holds indices into "ideationHypotheses", "businessModels" has one entry per selected hypothesis in the same order, and "finalThesis.selectedModelIndex" is an index into "businessModels".
```json
{skeleton}
```
2. **"manifesto"**: one string with the complete, fully rendered coding prompt-manifesto from phase 6. It must be concrete, detailed and free of placeholders.

Do not include any explanatory text or anything outside the JSON object."#,
            role = Self::strategist_role(&request.locale),
            language = request.locale.language_code(),
            domain = request.excavation_domain,
            context = request.creator_context,
            ambition = request.ambition_level,
            protocol = Self::protocol(&request.locale),
            skeleton = Self::thesis_skeleton(),
        )
    }

    pub fn socratic_feedback(human_need: &str) -> String {
        format!(
            r#"CONTEXT: The user is trying to find the root human need in their business domain.
USER'S RESPONSE: "{human_need}"

TASK: Act as a Socratic coach. If the answer is superficial (e.g. "they need an app"), ask a question that goes deeper (e.g. "And why do they believe an app would solve that? What deeper feeling are they seeking?"). If the answer is already deep (e.g. "they seek status"), validate and reinforce it.

Your response must be at most 2 sentences."#
        )
    }
}
