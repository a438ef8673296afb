mod openai_translator;
mod simulated_translator;
mod translator_factory;

pub use openai_translator::OpenAiTranslator;
pub use simulated_translator::SimulatedTranslator;
pub use translator_factory::TranslatorFactory;
