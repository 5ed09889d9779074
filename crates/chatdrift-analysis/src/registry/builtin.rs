//! Built-in template definitions.
//!
//! Listing order is the order below. Names must stay unique; marker sets must
//! stay distinguishable so each template's own skeleton detects as itself.

use super::types::Template;

pub static TEMPLATES: &[Template] = &[
    // Qwen2, OpenHermes, Yi, Dolphin
    Template {
        name: "chatml",
        bos_token: None,
        eos_token: Some("<|im_end|>"),
        user_prefix: "<|im_start|>user\n",
        user_suffix: "<|im_end|>\n",
        assistant_prefix: "<|im_start|>assistant\n",
        assistant_suffix: "<|im_end|>\n",
        system_prefix: Some("<|im_start|>system\n"),
        system_suffix: Some("<|im_end|>\n"),
    },
    // The system block sits inside the first [INST] turn.
    Template {
        name: "llama2",
        bos_token: Some("<s>"),
        eos_token: Some("</s>"),
        user_prefix: "[INST] ",
        user_suffix: " [/INST] ",
        assistant_prefix: "",
        assistant_suffix: " </s>",
        system_prefix: Some("<<SYS>>\n"),
        system_suffix: Some("\n<</SYS>>\n\n"),
    },
    Template {
        name: "llama3",
        bos_token: Some("<|begin_of_text|>"),
        eos_token: Some("<|eot_id|>"),
        user_prefix: "<|start_header_id|>user<|end_header_id|>\n\n",
        user_suffix: "<|eot_id|>",
        assistant_prefix: "<|start_header_id|>assistant<|end_header_id|>\n\n",
        assistant_suffix: "<|eot_id|>",
        system_prefix: Some("<|start_header_id|>system<|end_header_id|>\n\n"),
        system_suffix: Some("<|eot_id|>"),
    },
    // Mistral/Mixtral: unpadded [INST] markers, no system role.
    Template {
        name: "mistral",
        bos_token: Some("<s>"),
        eos_token: Some("</s>"),
        user_prefix: "[INST]",
        user_suffix: "[/INST]",
        assistant_prefix: "",
        assistant_suffix: "</s>",
        system_prefix: None,
        system_suffix: None,
    },
    Template {
        name: "alpaca",
        bos_token: None,
        eos_token: None,
        user_prefix: "### Instruction:\n",
        user_suffix: "\n\n",
        assistant_prefix: "### Response:\n",
        assistant_suffix: "",
        system_prefix: None,
        system_suffix: None,
    },
    Template {
        name: "vicuna",
        bos_token: Some("<s>"),
        eos_token: Some("</s>"),
        user_prefix: "USER: ",
        user_suffix: "\n",
        assistant_prefix: "ASSISTANT: ",
        assistant_suffix: "</s>",
        system_prefix: None,
        system_suffix: None,
    },
    // Zephyr, TinyLlama-Chat
    Template {
        name: "zephyr",
        bos_token: None,
        eos_token: Some("</s>"),
        user_prefix: "<|user|>\n",
        user_suffix: "</s>\n",
        assistant_prefix: "<|assistant|>\n",
        assistant_suffix: "</s>\n",
        system_prefix: Some("<|system|>\n"),
        system_suffix: Some("</s>\n"),
    },
    Template {
        name: "phi3",
        bos_token: None,
        eos_token: Some("<|end|>"),
        user_prefix: "<|user|>\n",
        user_suffix: "<|end|>\n",
        assistant_prefix: "<|assistant|>\n",
        assistant_suffix: "<|end|>\n",
        system_prefix: Some("<|system|>\n"),
        system_suffix: Some("<|end|>\n"),
    },
    Template {
        name: "gemma",
        bos_token: Some("<bos>"),
        eos_token: Some("<end_of_turn>"),
        user_prefix: "<start_of_turn>user\n",
        user_suffix: "<end_of_turn>\n",
        assistant_prefix: "<start_of_turn>model\n",
        assistant_suffix: "<end_of_turn>\n",
        system_prefix: None,
        system_suffix: None,
    },
];
