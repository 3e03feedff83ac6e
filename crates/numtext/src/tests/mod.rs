mod format_good;
