use std::path::Path;

use counter_core::{Effect, ModelListFailure, Msg};
use counter_engine::{load_model_list, CounterEngine, ModelId, ModelListError};
use counter_logging::{counter_info, counter_warn};

/// Executes core effects against the engine and answers with messages.
pub struct EffectRunner {
    engine: CounterEngine,
}

impl EffectRunner {
    pub fn new(engine: CounterEngine) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut replies = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                Effect::PrepareTokenizer { model } => {
                    let Some(id) = ModelId::new(&model) else {
                        counter_warn!("PrepareTokenizer with blank model ignored");
                        continue;
                    };
                    let tokenizer = self.engine.prepare(&id);
                    replies.push(Msg::TokenizerReady {
                        requested: model,
                        resolved: tokenizer.resolved().to_string(),
                        fell_back: tokenizer.fell_back(),
                    });
                }
                Effect::CountText { model, text } => {
                    counter_info!("CountText model={} text_len={}", model, text.len());
                    let Some(id) = ModelId::new(&model) else {
                        counter_warn!("CountText with blank model ignored");
                        continue;
                    };
                    match self.engine.count(&id, &text) {
                        Ok(counted) => {
                            replies.push(Msg::TokenizerReady {
                                requested: model.clone(),
                                resolved: counted.tokenizer.resolved().to_string(),
                                fell_back: counted.tokenizer.fell_back(),
                            });
                            replies.push(Msg::CountFinished {
                                model,
                                chars: counted.result.chars,
                                tokens: counted.result.tokens,
                            });
                        }
                        Err(err) => {
                            counter_warn!("Counting with {} failed: {}", model, err);
                            replies.push(Msg::CountFailed {
                                model,
                                reason: err.to_string(),
                            });
                        }
                    }
                }
            }
        }
        replies
    }
}

/// Reads the model list and wraps the outcome for the core.
pub fn model_list_msg(path: &Path) -> Msg {
    let result = load_model_list(path)
        .map(|models| models.into_iter().map(ModelId::into_string).collect())
        .map_err(|err| match err {
            ModelListError::Missing { path } => ModelListFailure::Missing {
                path: path.display().to_string(),
            },
            ModelListError::Io { path, source } => ModelListFailure::Unreadable {
                path: path.display().to_string(),
                message: source.to_string(),
            },
        });
    Msg::ModelListLoaded(result)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use counter_engine::{EncodeError, LoadError, TokenEncoder, TokenizerSource};
    use tempfile::TempDir;

    use super::*;

    struct WordEncoder;

    impl TokenEncoder for WordEncoder {
        fn encode_ids(&self, text: &str) -> Result<Vec<u32>, EncodeError> {
            Ok(text.split_whitespace().map(|_| 1).collect())
        }
    }

    /// Loads everything except `unknown/model`.
    struct StubSource;

    impl TokenizerSource for StubSource {
        fn load(&self, model: &ModelId) -> Result<Arc<dyn TokenEncoder>, LoadError> {
            if model.as_str() == "unknown/model" {
                Err(LoadError::Malformed {
                    id: model.to_string(),
                    message: "no tokenizer".to_string(),
                })
            } else {
                Ok(Arc::new(WordEncoder))
            }
        }
    }

    fn runner() -> EffectRunner {
        EffectRunner::new(CounterEngine::with_source(
            Arc::new(StubSource),
            ModelId::from_static("gpt2"),
        ))
    }

    #[test]
    fn prepare_reports_fallback() {
        let replies = runner().run(vec![Effect::PrepareTokenizer {
            model: "unknown/model".to_string(),
        }]);
        assert_eq!(
            replies,
            vec![Msg::TokenizerReady {
                requested: "unknown/model".to_string(),
                resolved: "gpt2".to_string(),
                fell_back: true,
            }]
        );
    }

    /// Behaves like the hub for a repository that does not exist.
    #[derive(Default)]
    struct MissingRepoSource {
        unknown_loads: AtomicUsize,
    }

    impl TokenizerSource for MissingRepoSource {
        fn load(&self, model: &ModelId) -> Result<Arc<dyn TokenEncoder>, LoadError> {
            if model.as_str() == "no-such-org/no-such-model" {
                self.unknown_loads.fetch_add(1, Ordering::SeqCst);
                Err(LoadError::NotFound {
                    id: model.to_string(),
                    status: 404,
                })
            } else {
                Ok(Arc::new(WordEncoder))
            }
        }
    }

    #[test]
    fn unknown_hub_repository_is_loaded_once() {
        let source = Arc::new(MissingRepoSource::default());
        let runner = EffectRunner::new(CounterEngine::with_source(
            source.clone(),
            ModelId::from_static("gpt2"),
        ));
        let model = "no-such-org/no-such-model".to_string();

        let mut effects = vec![Effect::PrepareTokenizer {
            model: model.clone(),
        }];
        for _ in 0..3 {
            effects.push(Effect::CountText {
                model: model.clone(),
                text: "hello world".to_string(),
            });
        }
        let replies = runner.run(effects);

        assert_eq!(source.unknown_loads.load(Ordering::SeqCst), 1);
        let fell_back = replies
            .iter()
            .filter(|msg| matches!(msg, Msg::TokenizerReady { fell_back: true, .. }))
            .count();
        assert_eq!(fell_back, 4);
        assert!(matches!(
            replies.last(),
            Some(Msg::CountFinished { chars: 11, tokens: 2, .. })
        ));
    }

    #[test]
    fn count_answers_with_both_numbers() {
        let replies = runner().run(vec![Effect::CountText {
            model: "gpt2".to_string(),
            text: "hello world".to_string(),
        }]);
        assert_eq!(
            replies.last(),
            Some(&Msg::CountFinished {
                model: "gpt2".to_string(),
                chars: 11,
                tokens: 2,
            })
        );
    }

    #[test]
    fn empty_text_is_reported_as_failure() {
        let replies = runner().run(vec![Effect::CountText {
            model: "gpt2".to_string(),
            text: String::new(),
        }]);
        assert!(matches!(replies.as_slice(), [Msg::CountFailed { .. }]));
    }

    #[test]
    fn missing_model_list_becomes_failure_message() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("models.txt");
        match model_list_msg(&path) {
            Msg::ModelListLoaded(Err(ModelListFailure::Missing { path: reported })) => {
                assert!(reported.ends_with("models.txt"));
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn model_list_is_forwarded_in_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("models.txt");
        std::fs::write(&path, "b\n\n a \n").unwrap();
        assert_eq!(
            model_list_msg(&path),
            Msg::ModelListLoaded(Ok(vec!["b".to_string(), "a".to_string()]))
        );
    }
}
