use chrono::Utc;
use std::collections::HashSet;

use crate::models::{CreateFaqRequest, Faq, UpdateFaqRequest};
use crate::services::assistant_service::{AssistantClient, GeneratedFaq};
use crate::store::{keys, read_records, write_records, RecordStore};
use crate::utils::error::ServiceError;

/// Dedup key: question text, case-insensitive, whitespace-trimmed.
fn question_key(question: &str) -> String {
    question.trim().to_lowercase()
}

pub async fn list(store: &dyn RecordStore) -> Vec<Faq> {
    read_records(store, keys::FAQS).await
}

pub async fn create(
    store: &dyn RecordStore,
    request: &CreateFaqRequest,
) -> Result<Faq, ServiceError> {
    let question = request.question.trim();
    let answer = request.answer.trim();

    if question.is_empty() {
        return Err(ServiceError::Validation {
            field: "question",
            message: "must not be empty".to_string(),
        });
    }
    if answer.is_empty() {
        return Err(ServiceError::Validation {
            field: "answer",
            message: "must not be empty".to_string(),
        });
    }

    let mut faqs: Vec<Faq> = read_records(store, keys::FAQS).await;

    let key = question_key(question);
    if faqs.iter().any(|f| question_key(&f.question) == key) {
        return Err(ServiceError::DuplicateQuestion);
    }

    let faq = Faq::new(question, answer);
    faqs.push(faq.clone());
    write_records(store, keys::FAQS, &faqs).await?;

    Ok(faq)
}

pub async fn update(
    store: &dyn RecordStore,
    id: &str,
    request: &UpdateFaqRequest,
) -> Result<Faq, ServiceError> {
    if let Some(question) = &request.question {
        if question.trim().is_empty() {
            return Err(ServiceError::Validation {
                field: "question",
                message: "must not be empty".to_string(),
            });
        }
    }
    if let Some(answer) = &request.answer {
        if answer.trim().is_empty() {
            return Err(ServiceError::Validation {
                field: "answer",
                message: "must not be empty".to_string(),
            });
        }
    }

    let mut faqs: Vec<Faq> = read_records(store, keys::FAQS).await;

    let pos = faqs
        .iter()
        .position(|f| f.id == id)
        .ok_or_else(|| ServiceError::NotFound(format!("FAQ {}", id)))?;

    if let Some(question) = &request.question {
        let key = question_key(question);
        if faqs
            .iter()
            .any(|f| f.id != id && question_key(&f.question) == key)
        {
            return Err(ServiceError::DuplicateQuestion);
        }
    }

    let faq = &mut faqs[pos];
    if let Some(question) = &request.question {
        faq.question = question.trim().to_string();
    }
    if let Some(answer) = &request.answer {
        faq.answer = answer.trim().to_string();
    }
    faq.updated_at = Utc::now();

    let updated = faq.clone();
    write_records(store, keys::FAQS, &faqs).await?;

    Ok(updated)
}

pub async fn delete(store: &dyn RecordStore, id: &str) -> Result<(), ServiceError> {
    let mut faqs: Vec<Faq> = read_records(store, keys::FAQS).await;

    if !faqs.iter().any(|f| f.id == id) {
        return Err(ServiceError::NotFound(format!("FAQ {}", id)));
    }

    faqs.retain(|f| f.id != id);
    write_records(store, keys::FAQS, &faqs).await
}

/// Merges generated pairs into the collection. Blank pairs are dropped and a
/// question that already exists case-insensitively (in the collection or
/// earlier in the batch) is skipped, so re-running the same input adds
/// nothing. Returns the records actually added.
pub fn merge_generated(faqs: &mut Vec<Faq>, generated: Vec<GeneratedFaq>) -> Vec<Faq> {
    let mut seen: HashSet<String> = faqs.iter().map(|f| question_key(&f.question)).collect();
    let mut added = Vec::new();

    for pair in generated {
        let question = pair.question.trim();
        let answer = pair.answer.trim();

        if question.is_empty() || answer.is_empty() {
            continue;
        }
        if !seen.insert(question_key(question)) {
            continue;
        }

        let faq = Faq::new(question, answer);
        faqs.push(faq.clone());
        added.push(faq);
    }

    added
}

/// Bulk generation through the external text-generation collaborator. The
/// collaborator guarantees neither dedup nor formatting; everything it
/// returns is validated and deduped here before the merge is persisted.
pub async fn bulk_generate(
    store: &dyn RecordStore,
    assistant: &AssistantClient,
    questions: &[String],
) -> Result<Vec<Faq>, ServiceError> {
    let wanted: Vec<String> = questions
        .iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect();

    if wanted.is_empty() {
        return Err(ServiceError::Validation {
            field: "questions",
            message: "must contain at least one question".to_string(),
        });
    }

    let generated = assistant.generate(&wanted).await?;

    let mut faqs: Vec<Faq> = read_records(store, keys::FAQS).await;
    let added = merge_generated(&mut faqs, generated);

    if !added.is_empty() {
        write_records(store, keys::FAQS, &faqs).await?;
    }

    log::info!(
        "✅ FAQ generation: {} requested, {} added after dedup",
        wanted.len(),
        added.len()
    );

    Ok(added)
}
