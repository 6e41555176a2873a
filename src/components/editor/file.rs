//! Browser file glue: reading a picked file, offering a download, alerts.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, Event, FileReader, HtmlAnchorElement, HtmlInputElement, Url};

use crate::canvas::error::{CanvasError, Result};

/// Completion callback shared by the reader's load and error handlers.
type DoneSlot = Rc<RefCell<Option<Box<dyn FnOnce(Result<String>)>>>>;

/// Whichever of load, error or a failed start happens first gets the callback.
fn finish(slot: &DoneSlot, result: Result<String>) {
	let callback = slot.borrow_mut().take();
	if let Some(callback) = callback {
		callback(result);
	}
}

/// Read the file chosen in the `<input type="file">` that fired `ev` and hand
/// its text (or the failure) to `on_done`. The input is reset so picking the
/// same file again fires another change event.
pub fn read_picked_file(ev: &Event, on_done: impl FnOnce(Result<String>) + 'static) {
	let Some(input) = ev
		.target()
		.and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
	else {
		return;
	};
	let Some(file) = input.files().and_then(|files| files.get(0)) else {
		return;
	};

	let callback: Box<dyn FnOnce(Result<String>)> = Box::new(on_done);
	let on_done: DoneSlot = Rc::new(RefCell::new(Some(callback)));

	let reader = match FileReader::new() {
		Ok(reader) => reader,
		Err(err) => {
			finish(&on_done, Err(err.into()));
			return;
		}
	};

	let (reader_cb, done_load) = (reader.clone(), on_done.clone());
	let onload = Closure::once_into_js(move || {
		let text = reader_cb
			.result()
			.map_err(CanvasError::from)
			.and_then(|value| {
				value
					.as_string()
					.ok_or_else(|| CanvasError::Read("file is not text".into()))
			});
		finish(&done_load, text);
	});
	reader.set_onload(Some(onload.unchecked_ref()));

	let (name, done_error) = (file.name(), on_done.clone());
	let onerror = Closure::once_into_js(move || {
		finish(&done_error, Err(CanvasError::Read(format!("{} could not be read", name))));
	});
	reader.set_onerror(Some(onerror.unchecked_ref()));

	if let Err(err) = reader.read_as_text(&file) {
		error!("Failed to start reading {}: {:?}", file.name(), err);
		finish(&on_done, Err(err.into()));
	}
	input.set_value("");
}

/// Offer `text` to the user as a JSON file download.
pub fn download_json(file_name: &str, text: &str) -> Result<()> {
	let parts = js_sys::Array::of1(&JsValue::from_str(text));
	let options = BlobPropertyBag::new();
	options.set_type("application/json");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let link: HtmlAnchorElement = document()
		.create_element("a")?
		.dyn_into()
		.map_err(JsValue::from)?;
	link.set_href(&url);
	link.set_download(file_name);
	link.click();

	Url::revoke_object_url(&url)?;
	Ok(())
}

/// Log `err` and show it in a blocking alert.
pub fn report(context: &str, err: &CanvasError) {
	error!("{}: {}", context, err);
	let _ = window().alert_with_message(&format!("{}: {}", context, err));
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[test]
	fn only_the_first_outcome_reaches_the_callback() {
		let calls = Rc::new(Cell::new(0));
		let failed = Rc::new(Cell::new(false));
		let (calls_cb, failed_cb) = (calls.clone(), failed.clone());
		let callback: Box<dyn FnOnce(Result<String>)> = Box::new(move |result| {
			calls_cb.set(calls_cb.get() + 1);
			failed_cb.set(result.is_err());
		});
		let slot: DoneSlot = Rc::new(RefCell::new(Some(callback)));

		finish(&slot, Err(CanvasError::Read("disk.json could not be read".into())));
		finish(&slot, Ok("{}".into()));

		assert_eq!(calls.get(), 1);
		assert!(failed.get());
	}
}
