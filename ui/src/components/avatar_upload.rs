use base64::{Engine as _, engine::general_purpose};
use payloads::{MAX_AVATAR_SIZE, requests, responses::UserProfile};
use wasm_bindgen::prelude::*;
use web_sys::{Event, FileReader, HtmlInputElement};
use yew::prelude::*;

use crate::components::Avatar;
use crate::contexts::toast::use_toast;
use crate::get_api_client;

const ACCEPTED_TYPES: [&str; 2] = ["image/png", "image/jpeg"];

#[derive(Clone, PartialEq)]
struct PendingUpload {
    data: Vec<u8>,
    preview_url: String,
}

#[derive(Properties, PartialEq)]
pub struct AvatarUploadProps {
    pub profile: UserProfile,
    /// Called with the updated profile after an upload or removal.
    pub on_change: Callback<UserProfile>,
}

/// Pick, preview, and upload a PNG or JPEG avatar, or remove the current
/// one. Type and size are checked here before the api sees the file.
#[function_component]
pub fn AvatarUpload(props: &AvatarUploadProps) -> Html {
    let file_input_ref = use_node_ref();
    let pending_upload = use_state(|| None::<PendingUpload>);
    let is_uploading = use_state(|| false);
    let error_message = use_state(|| None::<String>);
    let toast = use_toast();

    let clear_input = {
        let file_input_ref = file_input_ref.clone();
        move || {
            if let Some(input) = file_input_ref.cast::<HtmlInputElement>() {
                input.set_value("");
            }
        }
    };

    let on_file_select = {
        let pending_upload = pending_upload.clone();
        let error_message = error_message.clone();

        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };

            let content_type = file.type_();
            if !ACCEPTED_TYPES.contains(&content_type.as_str()) {
                error_message
                    .set(Some("Please choose a PNG or JPEG image.".to_string()));
                return;
            }
            let file_size = file.size() as usize;
            if file_size > MAX_AVATAR_SIZE {
                error_message.set(Some(format!(
                    "File is too large ({:.1}MB). Maximum size is {}MB.",
                    file_size as f64 / 1_048_576.0,
                    MAX_AVATAR_SIZE / 1_048_576
                )));
                return;
            }

            let reader = match FileReader::new() {
                Ok(reader) => reader,
                Err(e) => {
                    tracing::error!("Could not create FileReader: {e:?}");
                    return;
                }
            };
            let reader_clone = reader.clone();
            let pending_upload = pending_upload.clone();
            let error_message = error_message.clone();

            let onload = Closure::wrap(Box::new(move |_: Event| {
                let Ok(result) = reader_clone.result() else {
                    error_message
                        .set(Some("Could not read the file.".to_string()));
                    return;
                };
                let data = js_sys::Uint8Array::new(&result).to_vec();
                let preview_url = format!(
                    "data:{content_type};base64,{}",
                    general_purpose::STANDARD.encode(&data)
                );
                pending_upload.set(Some(PendingUpload { data, preview_url }));
                error_message.set(None);
            }) as Box<dyn FnMut(_)>);

            reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            if let Err(e) = reader.read_as_array_buffer(&file) {
                tracing::error!("Could not read file: {e:?}");
            }
            onload.forget();
        })
    };

    let on_upload = {
        let pending_upload = pending_upload.clone();
        let is_uploading = is_uploading.clone();
        let error_message = error_message.clone();
        let on_change = props.on_change.clone();
        let toast = toast.clone();
        let clear_input = clear_input.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(upload) = (*pending_upload).clone() else {
                return;
            };
            let pending_upload = pending_upload.clone();
            let is_uploading = is_uploading.clone();
            let error_message = error_message.clone();
            let on_change = on_change.clone();
            let toast = toast.clone();
            let clear_input = clear_input.clone();

            wasm_bindgen_futures::spawn_local(async move {
                is_uploading.set(true);
                let request = requests::UploadAvatar {
                    image_data: upload.data,
                };
                match get_api_client().upload_avatar(&request).await {
                    Ok(profile) => {
                        pending_upload.set(None);
                        clear_input();
                        toast.success("Avatar updated");
                        on_change.emit(profile);
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                }
                is_uploading.set(false);
            });
        })
    };

    let on_remove = {
        let is_uploading = is_uploading.clone();
        let error_message = error_message.clone();
        let on_change = props.on_change.clone();

        Callback::from(move |_: MouseEvent| {
            let is_uploading = is_uploading.clone();
            let error_message = error_message.clone();
            let on_change = on_change.clone();
            let toast = toast.clone();

            wasm_bindgen_futures::spawn_local(async move {
                is_uploading.set(true);
                match get_api_client().delete_avatar().await {
                    Ok(profile) => {
                        toast.success("Avatar removed");
                        on_change.emit(profile);
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                }
                is_uploading.set(false);
            });
        })
    };

    let on_cancel = {
        let pending_upload = pending_upload.clone();
        let error_message = error_message.clone();
        Callback::from(move |_: MouseEvent| {
            pending_upload.set(None);
            error_message.set(None);
            clear_input();
        })
    };

    let on_choose = {
        let file_input_ref = file_input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = file_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let profile = &props.profile;
    let busy = *is_uploading;

    html! {
        <div class="space-y-3">
            <input
                ref={file_input_ref}
                type="file"
                accept={ACCEPTED_TYPES.join(",")}
                onchange={on_file_select}
                class="hidden"
                disabled={busy}
            />
            <div class="flex items-center space-x-4">
                {match &*pending_upload {
                    Some(upload) => html! {
                        <img
                            src={upload.preview_url.clone()}
                            alt="Preview"
                            class="w-20 h-20 rounded-full object-cover"
                        />
                    },
                    None => html! {
                        <Avatar
                            user_id={profile.user_id}
                            username={profile.username.clone()}
                            avatar_updated_at={profile.avatar_updated_at}
                            large=true
                        />
                    },
                }}
                <div class="flex space-x-2">
                    if pending_upload.is_some() {
                        <button onclick={on_upload} disabled={busy} class="text-sm underline disabled:opacity-50">
                            {if busy { "Uploading..." } else { "Upload" }}
                        </button>
                        <button onclick={on_cancel} disabled={busy} class="text-sm underline">
                            {"Cancel"}
                        </button>
                    } else {
                        <button onclick={on_choose} disabled={busy} class="text-sm underline">
                            {"Choose image"}
                        </button>
                        if profile.avatar_updated_at.is_some() {
                            <button onclick={on_remove} disabled={busy} class="text-sm underline text-red-600">
                                {"Remove"}
                            </button>
                        }
                    }
                </div>
            </div>
            if let Some(error) = &*error_message {
                <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
            }
        </div>
    }
}
