pub mod json_api;

pub use json_api::{
    autofill_bracket_json, rescore_json, score_bracket_json, simulate, AutofillRequest, RescoreRequest,
    RescoreResponse, ScoreRequest, ScoreResponse,
};
