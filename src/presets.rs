use serde::Serialize;

/// Instruction used when no preset or prompt applies, and for unmapped preset keys.
pub const DEFAULT_INSTRUCTION: &str = "Analyze this image";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Preset {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub instruction: &'static str,
}

pub static PRESETS: &[Preset] = &[
    Preset {
        key: "analyze",
        label: "Analyze Image",
        description: "Detailed analysis of the image",
        instruction: "Analyze this image in detail. Describe what you see, identify key elements, colors, composition, and any notable features.",
    },
    Preset {
        key: "summarize",
        label: "Summarize",
        description: "Quick summary of image content",
        instruction: "Provide a concise summary of what's shown in this image in 2-3 sentences.",
    },
    Preset {
        key: "describe",
        label: "Describe",
        description: "Detailed description for accessibility",
        instruction: "Describe this image as if you're explaining it to someone who cannot see it. Be detailed and specific.",
    },
    Preset {
        key: "extract_text",
        label: "Extract Text",
        description: "Extract any text from the image",
        instruction: "Extract and transcribe any text visible in this image. If no text is present, say 'No text detected'.",
    },
    Preset {
        key: "identify_objects",
        label: "Identify Objects",
        description: "List objects and items in the image",
        instruction: "Identify and list all the objects, people, or items you can see in this image.",
    },
    Preset {
        key: "explain_context",
        label: "Explain Context",
        description: "Explain the setting and context",
        instruction: "Explain the context and setting of this image. What's happening? Where might this be taken?",
    },
];

pub fn find(key: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.key == key)
}

/// Canned instruction for `key`, or [`DEFAULT_INSTRUCTION`] when the key is unknown.
pub fn instruction_for(key: &str) -> &'static str {
    find(key).map_or(DEFAULT_INSTRUCTION, |p| p.instruction)
}
