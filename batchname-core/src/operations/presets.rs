use crate::output::{ExamplesResult, PresetInfo, PresetsResult};
use crate::preset::{examples, Preset};

pub fn presets_operation() -> PresetsResult {
    PresetsResult {
        presets: Preset::all().iter().copied().map(PresetInfo::from).collect(),
    }
}

pub fn examples_operation() -> ExamplesResult {
    ExamplesResult {
        examples: examples(),
    }
}
