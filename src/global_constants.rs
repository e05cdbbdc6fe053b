pub const APPLICATION_TITLE: &str = "PaddleOCR 文字识别系统";
pub const APPLICATION_SUBTITLE: &str = "基于PaddleOCR的文字识别和文档处理系统";

pub const MAX_UPLOAD_SIZE_BYTES: u64 = 10 * 1024 * 1024;

pub const OCR_IMAGE_ENDPOINT: &str = "/api/ocr/image";
pub const OCR_DOCUMENT_ENDPOINT: &str = "/api/ocr/document";
pub const MULTIPART_FILE_FIELD: &str = "file";

pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_PNG: &str = "image/png";
pub const MIME_GIF: &str = "image/gif";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_LEGACY_SPREADSHEET: &str = "application/vnd.ms-excel";
pub const MIME_MODERN_SPREADSHEET: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const MIME_OCTET_STREAM: &str = "application/octet-stream";

pub const ALLOWED_MIME_TYPES: [&str; 6] = [
    MIME_JPEG,
    MIME_PNG,
    MIME_GIF,
    MIME_PDF,
    MIME_LEGACY_SPREADSHEET,
    MIME_MODERN_SPREADSHEET,
];

pub const PICKER_ACCEPT_FILTER: &str = "image/*,.pdf,.xlsx,.xls,.csv";

pub const DEFAULT_BACKEND_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_UPLOAD_CHUNK_SIZE_BYTES: usize = 64 * 1024;
pub const BACKEND_URL_ENV_VAR: &str = "OCR_UPLOADER_BACKEND_URL";
pub const SETTINGS_DIR_NAME: &str = "ocr-uploader";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub const SNIFF_HEADER_BYTES: usize = 8192;

pub const USER_MESSAGE_UNSUPPORTED_TYPE: &str = "不支持的文件类型，请上传图片、PDF或Excel文件";
pub const USER_MESSAGE_FILE_TOO_LARGE: &str = "文件过大，请上传小于10MB的文件";
pub const USER_MESSAGE_NO_FILE_SELECTED: &str = "请先选择文件";
pub const USER_MESSAGE_PROCESSING_FAILED_PREFIX: &str = "处理失败: ";
pub const USER_MESSAGE_UPLOAD_FAILED_PREFIX: &str = "上传或处理失败: ";
pub const USER_MESSAGE_FILE_UNREADABLE_PREFIX: &str = "无法读取文件: ";
pub const USER_MESSAGE_UNKNOWN_ERROR: &str = "未知错误";

pub const LABEL_PICK_FILE: &str = "点击选择文件";
pub const LABEL_SUPPORTED_FILES: &str = "支持图片、PDF和Excel文件";
pub const LABEL_PATH_PLACEHOLDER: &str = "输入文件路径或拖放文件到窗口";
pub const LABEL_SELECT_BUTTON: &str = "选择";
pub const LABEL_START_BUTTON: &str = "开始识别";
pub const LABEL_PROCESSING_BUTTON: &str = "处理中...";
pub const LABEL_CANCEL_BUTTON: &str = "取消";
pub const LABEL_RESULTS_TITLE: &str = "识别结果";
pub const LABEL_COPY_BUTTON: &str = "复制文本";
pub const LABEL_CLEAR_BUTTON: &str = "清除";
