pub mod txt2img_response;
