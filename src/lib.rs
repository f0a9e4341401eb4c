//! # Space Chat
//!
//! A conversational front-end for questions about space.
//!
//! This library provides:
//! - A tool-calling agent that answers a query in the context of a chat history
//! - Six read-only tools over public space-data APIs (APOD, Mars rover photos,
//!   moon phase and weather, ISS position, people in space, DONKI space weather)
//! - An HTTP server with a chat page and a JSON API
//!
//! ## Architecture
//!
//! A turn is bounded: the model may call at most one tool before it must answer.
//! 1. Flatten the session history and the new query into a prompt
//! 2. Call the LLM with the tool set (parallel tool calls disabled)
//! 3. If a tool is requested, run it once and feed the result back
//! 4. Ask the LLM for the final answer
//!
//! ## Example
//!
//! ```rust,ignore
//! use space_chat::{agent::Agent, config::Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(&config)?;
//! let reply = agent.chat("Where is the ISS right now?", &[]).await?;
//! println!("{}", reply.response);
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod fetchers;
pub mod llm;
pub mod session;
pub mod tools;

pub use config::Config;
