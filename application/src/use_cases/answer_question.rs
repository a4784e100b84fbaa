//! Answer Question use case.
//!
//! Classifies a question and dispatches it: math goes to the local math
//! engine, everything else becomes a prompt for the [`LlmGateway`].
//!
//! The use case never fails. Evaluation and backend errors are folded into
//! the returned [`Answer`], whose `Display` is the text shown to the user.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{AnswerProgressNotifier, NoAnswerProgress};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use triage_domain::{
    Classification, MATH_ERROR_PREFIX, MATH_RESULT_PREFIX, PromptTemplate, Question, evaluate,
};

/// Prefix of a failed LLM call.
pub const LLM_ERROR_PREFIX: &str = "LLM error: ";

/// The outcome of answering one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Simplified math expression, rendered
    MathResult(String),
    /// Math parse or evaluation failure message
    MathError(String),
    /// Verbatim backend response
    Generated {
        classification: Classification,
        text: String,
    },
    /// Backend failure message
    LlmError {
        classification: Classification,
        message: String,
    },
}

impl Answer {
    /// The classification that routed this answer.
    pub fn classification(&self) -> Classification {
        match self {
            Answer::MathResult(_) | Answer::MathError(_) => Classification::Math,
            Answer::Generated { classification, .. } | Answer::LlmError { classification, .. } => {
                *classification
            }
        }
    }

    /// Outcome tag used in the conversation log.
    pub fn outcome(&self) -> &'static str {
        match self {
            Answer::MathResult(_) => "math_result",
            Answer::MathError(_) => "math_error",
            Answer::Generated { .. } => "generated",
            Answer::LlmError { .. } => "llm_error",
        }
    }

    /// Whether this answer reports a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, Answer::MathError(_) | Answer::LlmError { .. })
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::MathResult(result) => write!(f, "{}{}", MATH_RESULT_PREFIX, result),
            Answer::MathError(message) => write!(f, "{}{}", MATH_ERROR_PREFIX, message),
            Answer::Generated { text, .. } => write!(f, "{}", text),
            Answer::LlmError { message, .. } => write!(f, "{}{}", LLM_ERROR_PREFIX, message),
        }
    }
}

/// Use case for answering a single question.
///
/// Holds no mutable state; one instance can serve concurrent calls.
#[derive(Clone)]
pub struct AnswerQuestionUseCase {
    gateway: Arc<dyn LlmGateway>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl AnswerQuestionUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Short description of the LLM backend, e.g. `ollama:llama3`.
    pub fn backend(&self) -> String {
        self.gateway.describe()
    }

    /// Answer `question` and report progress along the way.
    pub async fn execute(
        &self,
        question: &Question,
        progress: &dyn AnswerProgressNotifier,
    ) -> Answer {
        let classification = question.classification();
        info!(%classification, chars = question.content().chars().count(), "Dispatching question");
        progress.on_classified(classification);

        let answer = match classification {
            Classification::Math => match evaluate(question.content()) {
                Ok(result) => Answer::MathResult(result.to_string()),
                Err(e) => {
                    debug!("Math evaluation failed: {}", e);
                    Answer::MathError(e.to_string())
                }
            },
            Classification::Opinion | Classification::Factual => {
                self.generate(classification, question, progress).await
            }
        };

        self.conversation_logger.log(ConversationEvent::new(
            "question_answered",
            serde_json::json!({
                "question": question.content(),
                "classification": classification.as_str(),
                "outcome": answer.outcome(),
                "text": answer.to_string(),
            }),
        ));

        answer
    }

    /// Answer `question` and return the user-facing text.
    pub async fn answer(&self, question: &str) -> String {
        self.execute(&Question::new(question), &NoAnswerProgress)
            .await
            .to_string()
    }

    async fn generate(
        &self,
        classification: Classification,
        question: &Question,
        progress: &dyn AnswerProgressNotifier,
    ) -> Answer {
        let prompt = PromptTemplate::classified_question(classification, question.content());
        let backend = self.gateway.describe();
        debug!(%backend, "Prompt: {}", prompt);

        progress.on_generation_start(&backend);
        let result = self.gateway.generate(&prompt).await;
        progress.on_generation_end(result.is_ok());

        match result {
            Ok(text) => {
                info!(%backend, bytes = text.len(), "LLM response received");
                Answer::Generated {
                    classification,
                    text,
                }
            }
            Err(e) => {
                warn!(%backend, "LLM call failed: {}", e);
                Answer::LlmError {
                    classification,
                    message: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use triage_domain::evaluate_math;

    // ==================== Test Mocks ====================

    struct MockGateway {
        response: Result<String, GatewayError>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGateway {
        fn replying(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: GatewayError) -> Self {
            Self {
                response: Err(error),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.response.clone()
        }

        fn describe(&self) -> String {
            "mock".to_string()
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<ConversationEvent>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        calls: Mutex<Vec<String>>,
    }

    impl AnswerProgressNotifier for RecordingProgress {
        fn on_classified(&self, classification: Classification) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("classified:{}", classification));
        }

        fn on_generation_start(&self, backend: &str) {
            self.calls.lock().unwrap().push(format!("start:{}", backend));
        }

        fn on_generation_end(&self, success: bool) {
            self.calls.lock().unwrap().push(format!("end:{}", success));
        }
    }

    fn use_case(gateway: &Arc<MockGateway>) -> AnswerQuestionUseCase {
        AnswerQuestionUseCase::new(gateway.clone())
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_math_is_answered_locally() {
        let gateway = Arc::new(MockGateway::replying("unused"));
        let uc = use_case(&gateway);

        assert_eq!(uc.answer("2+2").await, "Math result: 4");
        assert_eq!(uc.answer("1").await, "Math result: 1");
        assert!(gateway.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_math_answer_matches_evaluator() {
        let gateway = Arc::new(MockGateway::replying("unused"));
        let uc = use_case(&gateway);

        for q in ["x^2 + 2*x + 1", "this is not math (", "1/0", "sqrt(8)"] {
            assert_eq!(uc.answer(q).await, evaluate_math(q));
        }
    }

    #[tokio::test]
    async fn test_factual_question_goes_to_llm() {
        let gateway = Arc::new(MockGateway::replying("Paris."));
        let uc = use_case(&gateway);

        let out = uc.answer("What is the capital of France?").await;

        assert_eq!(out, "Paris.");
        assert_eq!(
            gateway.prompts(),
            vec![
                "Classified as factual question. User asked: What is the capital of France?. Provide a helpful response."
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_opinion_question_prompt() {
        let gateway = Arc::new(MockGateway::replying("I like it."));
        let uc = use_case(&gateway);

        let answer = uc
            .execute(&Question::new("What do you think of Rust?"), &NoAnswerProgress)
            .await;

        assert_eq!(
            answer,
            Answer::Generated {
                classification: Classification::Opinion,
                text: "I like it.".to_string(),
            }
        );
        assert!(gateway.prompts()[0].starts_with("Classified as opinion question."));
    }

    #[tokio::test]
    async fn test_response_returned_verbatim() {
        let raw = "  Line one\n\nLine two  \n";
        let gateway = Arc::new(MockGateway::replying(raw));
        let uc = use_case(&gateway);

        assert_eq!(uc.answer("Who wrote Hamlet?").await, raw);
    }

    #[tokio::test]
    async fn test_llm_failure_becomes_error_text() {
        let gateway = Arc::new(MockGateway::failing(GatewayError::ConnectionError(
            "connection refused".to_string(),
        )));
        let uc = use_case(&gateway);

        let out = uc.answer("Who wrote Hamlet?").await;

        assert_eq!(out, "LLM error: Connection error: connection refused");
        assert!(out.starts_with(LLM_ERROR_PREFIX));
    }

    #[tokio::test]
    async fn test_empty_question_is_factual() {
        let gateway = Arc::new(MockGateway::replying("?"));
        let uc = use_case(&gateway);

        assert_eq!(uc.answer("").await, "?");
        assert_eq!(
            gateway.prompts(),
            vec!["Classified as factual question. User asked: . Provide a helpful response.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_progress_callbacks() {
        let gateway = Arc::new(MockGateway::replying("ok"));
        let uc = use_case(&gateway);
        let progress = RecordingProgress::default();

        uc.execute(&Question::new("Who are you?"), &progress).await;
        uc.execute(&Question::new("3*3"), &progress).await;

        assert_eq!(
            *progress.calls.lock().unwrap(),
            vec![
                "classified:factual",
                "start:mock",
                "end:true",
                "classified:math",
            ]
        );
        assert_eq!(uc.backend(), "mock");
    }

    #[tokio::test]
    async fn test_conversation_log_records_each_answer() {
        let gateway = Arc::new(MockGateway::failing(GatewayError::Timeout));
        let logger = Arc::new(RecordingLogger::default());
        let uc = use_case(&gateway).with_conversation_logger(logger.clone());

        uc.answer("1 + 1").await;
        uc.answer("I feel fine").await;

        let events = logger.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, "question_answered");
        assert_eq!(events[0].payload["classification"], "math");
        assert_eq!(events[0].payload["outcome"], "math_result");
        assert_eq!(events[0].payload["text"], "Math result: 2");
        assert_eq!(events[1].payload["classification"], "opinion");
        assert_eq!(events[1].payload["outcome"], "llm_error");
        assert_eq!(events[1].payload["text"], "LLM error: Timeout");
    }

    #[test]
    fn test_answer_classification_and_outcome() {
        let answer = Answer::MathError("division by zero".to_string());
        assert_eq!(answer.classification(), Classification::Math);
        assert_eq!(answer.outcome(), "math_error");
        assert!(answer.is_error());
        assert_eq!(answer.to_string(), "Error evaluating math: division by zero");

        let answer = Answer::Generated {
            classification: Classification::Factual,
            text: "hi".to_string(),
        };
        assert_eq!(answer.classification(), Classification::Factual);
        assert!(!answer.is_error());
    }
}
