//! User-facing notification text.

pub const SEARCH_QUERY_REQUIRED: &str = "検索キーワードを入力してください";
pub const SEARCH_FAILED: &str = "検索に失敗しました";
pub const SEARCH_NO_RESULTS: &str = "該当する店舗が見つかりませんでした";

pub fn search_results_found(count: usize) -> String {
    format!("{count}件の候補が見つかりました")
}

pub const PLACE_CREATED: &str = "店舗を投稿しました！";
pub const VALIDATION_FAILED: &str = "バリデーションエラー";
pub const PLACE_ALREADY_EXISTS: &str = "この店舗は既に登録されています";
pub const CREATE_FAILED: &str = "データベースエラー: 店舗の保存に失敗しました";

pub fn images_uploaded(count: usize) -> String {
    format!("{count}枚の画像をアップロードしました")
}

pub const IMAGE_DELETED: &str = "画像を削除しました";
pub const UPLOAD_FAILED: &str = "画像のアップロードに失敗しました";
pub const DELETE_FAILED: &str = "画像の削除に失敗しました";
