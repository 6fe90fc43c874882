// src/codec.rs

//! JSON and TOML encodings of [`Flow`] and [`State`].
//!
//! Field names are the persisted contract (`tasks`, `deps`, `task_states`,
//! `order`, `i_graph`); decoding something this module encoded gives back an
//! equal value.

use std::io::{Read, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::model::Flow;
use crate::dag::state::State;
use crate::errors::Result;

pub fn flow_from_json_str(data: &str) -> Result<Flow> {
    from_json_str(data)
}

pub fn flow_from_json_reader<R: Read>(reader: R) -> Result<Flow> {
    from_json_reader(reader)
}

pub fn flow_to_json_string(flow: &Flow) -> Result<String> {
    to_json_string(flow)
}

pub fn flow_to_json_writer<W: Write>(writer: W, flow: &Flow) -> Result<()> {
    to_json_writer(writer, flow)
}

pub fn flow_from_toml_str(data: &str) -> Result<Flow> {
    Ok(toml::from_str(data)?)
}

pub fn flow_to_toml_string(flow: &Flow) -> Result<String> {
    Ok(toml::to_string(flow)?)
}

pub fn state_from_json_str(data: &str) -> Result<State> {
    from_json_str(data)
}

pub fn state_from_json_reader<R: Read>(reader: R) -> Result<State> {
    from_json_reader(reader)
}

pub fn state_to_json_string(state: &State) -> Result<String> {
    to_json_string(state)
}

pub fn state_to_json_writer<W: Write>(writer: W, state: &State) -> Result<()> {
    to_json_writer(writer, state)
}

pub fn state_from_toml_str(data: &str) -> Result<State> {
    Ok(toml::from_str(data)?)
}

pub fn state_to_toml_string(state: &State) -> Result<String> {
    Ok(toml::to_string(state)?)
}

fn from_json_str<T: DeserializeOwned>(data: &str) -> Result<T> {
    Ok(serde_json::from_str(data)?)
}

fn from_json_reader<T: DeserializeOwned, R: Read>(reader: R) -> Result<T> {
    Ok(serde_json::from_reader(reader)?)
}

fn to_json_string<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

fn to_json_writer<T: Serialize, W: Write>(mut writer: W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut writer, value)?;
    writer.write_all(b"\n")?;
    Ok(())
}
