pub mod generation_request_dto;
